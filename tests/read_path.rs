//! Integration tests for the read path: a model output built from a reloaded
//! aggregate equals one built right after construction.

mod common;

use common::{token, Wiring};
use media_catalog::application::handlers::cast_member::CastMemberOutput;
use media_catalog::application::handlers::category::CategoryOutput;
use media_catalog::application::handlers::genre::GenreOutput;
use media_catalog::application::handlers::video::VideoOutput;
use media_catalog::domain::cast_member::{CastMember, CastMemberType};
use media_catalog::domain::category::Category;
use media_catalog::domain::foundation::{AggregateRoot, SearchableRepository};
use media_catalog::domain::genre::Genre;
use media_catalog::domain::video::{MediaSlot, Rating, Video, VideoAttributes};
use media_catalog::ports::UnitOfWork;

#[tokio::test]
async fn every_aggregate_reads_back_unchanged() {
    let w = Wiring::new();

    let category = Category::new("Movies", "Feature films", false).unwrap();
    let genre = Genre::new("Drama", true, [category.id()]).unwrap();
    let member = CastMember::new("Jane Doe", CastMemberType::Director).unwrap();
    let mut video = Video::new(
        VideoAttributes {
            title: "Arrival".to_string(),
            description: "First contact".to_string(),
            year_launched: 2016,
            duration: 116,
            rating: Rating::R12,
            opened: true,
        },
        [category.id()],
        [genre.id()],
        [member.id()],
    )
    .unwrap();
    video.attach(MediaSlot::Media, "raw/arrival.mp4");
    video.attach(MediaSlot::Banner, "img/arrival-banner.png");
    video.mark_sent_to_encode(MediaSlot::Media).unwrap();
    video.publish();

    let expected = (
        CategoryOutput::from(&category),
        GenreOutput::from(&genre),
        CastMemberOutput::from(&member),
        VideoOutput::from(&video),
    );
    let ids = (category.id(), genre.id(), member.id(), video.id());

    w.session.categories().insert(category, &token()).await.unwrap();
    w.session.genres().insert(genre, &token()).await.unwrap();
    w.session.cast_members().insert(member, &token()).await.unwrap();
    w.session.videos().insert(video, &token()).await.unwrap();
    w.unit_of_work.commit(&token()).await.unwrap();

    let reader = w.next_request();
    let reloaded = (
        CategoryOutput::from(&reader.session.categories().get(ids.0, &token()).await.unwrap()),
        GenreOutput::from(&reader.session.genres().get(ids.1, &token()).await.unwrap()),
        CastMemberOutput::from(&reader.session.cast_members().get(ids.2, &token()).await.unwrap()),
        VideoOutput::from(&reader.session.videos().get(ids.3, &token()).await.unwrap()),
    );

    assert_eq!(reloaded, expected);
}

#[tokio::test]
async fn outputs_serialize_with_wire_names() {
    let member = CastMember::new("Jane Doe", CastMemberType::Actor).unwrap();
    let json = serde_json::to_value(CastMemberOutput::from(&member)).unwrap();

    assert_eq!(json["name"], "Jane Doe");
    assert!(json.get("type").is_some());
    assert!(json.get("member_type").is_none());
}
