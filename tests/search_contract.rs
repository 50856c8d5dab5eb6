//! Integration tests for the searchable repository contract over the
//! in-memory catalog, driven through the list handlers.

mod common;

use proptest::prelude::*;

use common::{token, Wiring};
use media_catalog::application::handlers::category::ListCategoriesHandler;
use media_catalog::domain::category::Category;
use media_catalog::domain::foundation::{AggregateRoot, SearchInput, SearchOrder, SearchableRepository};
use media_catalog::ports::UnitOfWork;

async fn seed(w: &Wiring, names: &[String]) -> Vec<Category> {
    let repo = w.session.categories();
    let mut seeded = Vec::new();
    for name in names {
        let mut category = Category::new(name.as_str(), "", true).unwrap();
        category.clear_events();
        seeded.push(category.clone());
        repo.insert(category, &token()).await.unwrap();
    }
    w.unit_of_work.commit(&token()).await.unwrap();
    seeded
}

fn sorted_by_name(mut categories: Vec<Category>) -> Vec<Category> {
    categories.sort_by(|a, b| {
        a.name()
            .cmp(b.name())
            .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
    });
    categories
}

#[tokio::test]
async fn second_page_of_five_over_twelve_items() {
    let w = Wiring::new();
    let names: Vec<String> = (1..=12).map(|i| format!("Category {:02}", i)).collect();
    let seeded = seed(&w, &names).await;
    let input = SearchInput::new(2, 5, "", "name", SearchOrder::Asc).unwrap();

    let output = ListCategoriesHandler::new(w.session.categories())
        .handle(input, &token())
        .await
        .unwrap();

    assert_eq!(output.total, 12);
    assert_eq!(output.current_page, 2);
    assert_eq!(output.per_page, 5);
    let expected: Vec<_> = sorted_by_name(seeded)[5..10]
        .iter()
        .map(|c| c.id())
        .collect();
    let actual: Vec<_> = output.items.iter().map(|c| c.id).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn page_past_the_end_is_empty_but_counts_matches() {
    let w = Wiring::new();
    let names: Vec<String> = (1..=3).map(|i| format!("Category {}", i)).collect();
    seed(&w, &names).await;
    let input = SearchInput::new(4, 5, "", "", SearchOrder::Asc).unwrap();

    let output = w.session.categories().search(&input, &token()).await.unwrap();

    assert!(output.items.is_empty());
    assert_eq!(output.total, 3);
}

#[tokio::test]
async fn unknown_sort_field_falls_back_to_name_ascending() {
    let w = Wiring::new();
    let names = vec!["b".to_string(), "c".to_string(), "a".to_string()];
    seed(&w, &names).await;
    let input = SearchInput::new(1, 10, "", "popularity", SearchOrder::Desc).unwrap();

    let output = w.session.categories().search(&input, &token()).await.unwrap();

    let names: Vec<_> = output.items.iter().map(|c| c.name().to_string()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_page_is_the_matching_slice_of_the_sorted_set(
        names in prop::collection::vec("[a-d]{1,3}", 0..25),
        page in 1u32..6,
        per_page in 1u32..8,
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (seeded, output) = runtime.block_on(async {
            let w = Wiring::new();
            let seeded = seed(&w, &names).await;
            let input = SearchInput::new(page, per_page, "", "name", SearchOrder::Asc).unwrap();
            let output = w.session.categories().search(&input, &token()).await.unwrap();
            (seeded, output)
        });

        let expected: Vec<_> = sorted_by_name(seeded)
            .into_iter()
            .skip(((page - 1) * per_page) as usize)
            .take(per_page as usize)
            .map(|c| c.id())
            .collect();
        let actual: Vec<_> = output.items.iter().map(|c| c.id()).collect();

        prop_assert_eq!(output.total, names.len() as u64);
        prop_assert_eq!(actual, expected);
    }
}
