//! Integration tests for guarded replacement of a genre's category set.

mod common;

use std::collections::BTreeSet;

use common::{token, Wiring};
use media_catalog::application::handlers::genre::{
    CreateGenreCommand, CreateGenreHandler, UpdateGenreCommand, UpdateGenreHandler,
};
use media_catalog::domain::category::Category;
use media_catalog::domain::foundation::{
    AggregateRoot, CategoryId, DomainError, GenreId, SearchableRepository,
};
use media_catalog::domain::EventKind;
use media_catalog::ports::UnitOfWork;

async fn seed_categories(w: &Wiring, names: &[&str]) -> Vec<CategoryId> {
    let mut ids = Vec::new();
    for name in names {
        let category = Category::new(*name, "", true).unwrap();
        ids.push(category.id());
        w.session.categories().insert(category, &token()).await.unwrap();
    }
    w.unit_of_work.commit(&token()).await.unwrap();
    ids
}

async fn seed_genre(w: &Wiring, categories: Vec<CategoryId>) -> GenreId {
    let output = CreateGenreHandler::new(
        w.session.genres(),
        w.session.categories(),
        w.unit_of_work.clone(),
    )
    .handle(
        CreateGenreCommand {
            name: "Drama".to_string(),
            is_active: true,
            categories_id: categories,
        },
        &token(),
    )
    .await
    .unwrap();
    output.id
}

fn update_handler(w: &Wiring) -> UpdateGenreHandler {
    UpdateGenreHandler::new(
        w.session.genres(),
        w.session.categories(),
        w.unit_of_work.clone(),
    )
}

#[tokio::test]
async fn one_unknown_category_fails_and_leaves_the_set_unchanged() {
    let w = Wiring::new();
    let ids = seed_categories(&w, &["Movies", "Series", "Shorts"]).await;
    let genre_id = seed_genre(&w, vec![ids[0], ids[1]]).await;
    w.publisher.clear();

    let ghost = CategoryId::new();
    let next = w.next_request();
    let err = update_handler(&next)
        .handle(
            UpdateGenreCommand {
                id: genre_id,
                name: "Drama".to_string(),
                is_active: None,
                categories_id: Some(vec![ids[2], ghost]),
            },
            &token(),
        )
        .await
        .unwrap_err();

    match err {
        DomainError::RelatedAggregateNotFound { aggregate, ids } => {
            assert_eq!(aggregate, "Category");
            assert_eq!(ids, vec![ghost.to_string()]);
        }
        other => panic!("expected RelatedAggregateNotFound, got {other:?}"),
    }

    assert_eq!(next.publisher.calls(), 0);
    assert_eq!(next.session.staged_count().await, 0);
    let stored = next.session.genres().get(genre_id, &token()).await.unwrap();
    assert_eq!(
        stored.categories_id(),
        &BTreeSet::from([ids[0], ids[1]])
    );
}

#[tokio::test]
async fn replacing_with_known_categories_swaps_the_whole_set() {
    let w = Wiring::new();
    let ids = seed_categories(&w, &["Movies", "Series", "Shorts"]).await;
    let genre_id = seed_genre(&w, vec![ids[0], ids[1]]).await;

    let next = w.next_request();
    let output = update_handler(&next)
        .handle(
            UpdateGenreCommand {
                id: genre_id,
                name: "Drama".to_string(),
                is_active: None,
                categories_id: Some(vec![ids[2]]),
            },
            &token(),
        )
        .await
        .unwrap();

    assert_eq!(output.category_ids(), vec![ids[2]]);
    assert_eq!(next.publisher.kinds(), vec![EventKind::GenreUpdated]);
    let stored = next.session.genres().get(genre_id, &token()).await.unwrap();
    assert_eq!(stored.categories_id(), &BTreeSet::from([ids[2]]));
}

#[tokio::test]
async fn creating_with_unknown_categories_persists_nothing() {
    let w = Wiring::new();
    let known = seed_categories(&w, &["Movies"]).await;
    let ghosts = vec![CategoryId::new(), CategoryId::new()];
    let mut requested = known.clone();
    requested.extend(ghosts.iter().copied());

    let err = CreateGenreHandler::new(
        w.session.genres(),
        w.session.categories(),
        w.unit_of_work.clone(),
    )
    .handle(
        CreateGenreCommand {
            name: "Drama".to_string(),
            is_active: true,
            categories_id: requested,
        },
        &token(),
    )
    .await
    .unwrap_err();

    let DomainError::RelatedAggregateNotFound { ids, .. } = err else {
        panic!("expected RelatedAggregateNotFound");
    };
    let mut expected: Vec<String> = ghosts.iter().map(ToString::to_string).collect();
    let mut actual = ids;
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);
    assert_eq!(w.catalog.genre_count().await, 0);
}
