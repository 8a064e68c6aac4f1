//! Macro-generated test suite for `ListSource<Post>` contract validation.
//!
//! The `list_source_tests!` macro generates a test module that runs the post
//! pipeline end to end against any store implementing both
//! `ListSource<Post>` and `EntityStore<Post>`.
//!
//! # Generated Tests
//!
//! ## Walkthrough
//! - `test_publish_lists_pinned_first` — B (pinned) before A, draft C excluded
//! - `test_search_within_drafts` — "hello" + draft yields only C
//! - `test_unknown_sort_field_dropped` — unknown field ignored, views_count applies
//!
//! ## Properties
//! - `test_empty_query_is_noop`
//! - `test_pinned_precede_unpinned`
//! - `test_absent_status_is_publish_or_draft`
//! - `test_idempotent`
//!
//! ## Scoping
//! - `test_type_scoping` / `test_unknown_type_falls_back`
//! - `test_trash_scopes`
//! - `test_recency_tiebreak`
//! - `test_pagination` / `test_huge_page_is_empty`

#[allow(unused_macros)]
macro_rules! list_source_tests {
    ($factory:expr) => {
        mod list_source_contract_tests {
            use super::*;
            use listable::core::filter::{FilterRequest, SortOrder, StatusFilter};
            use listable::core::service::EntityStore;
            use listable::models::Post;

            #[tokio::test]
            async fn test_publish_lists_pinned_first() {
                let store = $factory;
                seed(&store, walkthrough_posts()).await;

                let request = FilterRequest::new().with_status(StatusFilter::Publish);
                let page = post_pipeline().apply_filter(&store, &request).await.unwrap();

                assert_eq!(titles(&page.data), vec!["B", "A"]);
                assert_eq!(page.pagination.total, 2);
            }

            #[tokio::test]
            async fn test_search_within_drafts() {
                let store = $factory;
                seed(&store, walkthrough_posts()).await;

                let request = FilterRequest::new()
                    .with_query("hello")
                    .with_status(StatusFilter::Draft);
                let page = post_pipeline().apply_filter(&store, &request).await.unwrap();

                assert_eq!(titles(&page.data), vec!["C"]);
            }

            #[tokio::test]
            async fn test_unknown_sort_field_dropped() {
                let store = $factory;
                let mut low = published(1, "low", day(5));
                low.views_count = 3;
                let mut high = published(2, "high", day(1));
                high.views_count = 30;
                let mut tie_old = published(3, "tie old", day(2));
                tie_old.views_count = 10;
                let mut tie_new = published(4, "tie new", day(3));
                tie_new.views_count = 10;
                seed(&store, vec![low, high, tie_old, tie_new]).await;

                let request = FilterRequest::new()
                    .with_order(SortOrder::asc("unknown_field"))
                    .with_order(SortOrder::desc("views_count"));
                let page = post_pipeline().apply_filter(&store, &request).await.unwrap();

                assert_eq!(
                    titles(&page.data),
                    vec!["high", "tie new", "tie old", "low"]
                );
            }

            #[tokio::test]
            async fn test_empty_query_is_noop() {
                let store = $factory;
                seed(&store, walkthrough_posts()).await;
                let pipeline = post_pipeline();

                let unfiltered = pipeline
                    .apply_filter(&store, &FilterRequest::new())
                    .await
                    .unwrap();
                for query in ["", "   "] {
                    let request = FilterRequest::new().with_query(query);
                    let page = pipeline.apply_filter(&store, &request).await.unwrap();
                    assert_eq!(page.data, unfiltered.data);
                }
                assert_eq!(unfiltered.data.len(), 3);
            }

            #[tokio::test]
            async fn test_search_is_case_insensitive_and_unanchored() {
                let store = $factory;
                let mut post = published(1, "Rust Ownership Explained", day(1));
                post.author_info = "Ferris".to_string();
                seed(&store, vec![post, published(2, "Gardening", day(1))]).await;
                let pipeline = post_pipeline();

                for query in ["OWNERSHIP", "ship exp", "ferr"] {
                    let request = FilterRequest::new().with_query(query);
                    let page = pipeline.apply_filter(&store, &request).await.unwrap();
                    assert_eq!(titles(&page.data), vec!["Rust Ownership Explained"], "{query}");
                }
            }

            #[tokio::test]
            async fn test_pinned_precede_unpinned() {
                let store = $factory;
                let mut pinned_old = published(1, "pinned old", day(1));
                pinned_old.top = Some(day(1));
                let mut pinned_new = published(2, "pinned new", day(1));
                pinned_new.top = Some(day(9));
                let mut popular = published(3, "popular", day(9));
                popular.views_count = 1000;
                seed(&store, vec![pinned_old, pinned_new, popular]).await;

                let request = FilterRequest::new().with_order(SortOrder::desc("views_count"));
                let page = post_pipeline().apply_filter(&store, &request).await.unwrap();

                assert_eq!(
                    titles(&page.data),
                    vec!["pinned new", "pinned old", "popular"]
                );
            }

            #[tokio::test]
            async fn test_absent_status_is_publish_or_draft() {
                let store = $factory;
                let mut pending = post(3, "pending", "pending");
                pending.published_at = None;
                seed(
                    &store,
                    vec![published(1, "live", day(1)), draft(2, "wip"), pending],
                )
                .await;
                let pipeline = post_pipeline();

                for status in [StatusFilter::Any, StatusFilter::parse_lenient("bogus")] {
                    let request = FilterRequest::new().with_status(status);
                    let page = pipeline.apply_filter(&store, &request).await.unwrap();

                    let mut listed = titles(&page.data);
                    listed.sort();
                    assert_eq!(listed, vec!["live", "wip"]);
                }
            }

            #[tokio::test]
            async fn test_idempotent() {
                let store = $factory;
                seed(&store, walkthrough_posts()).await;
                let pipeline = post_pipeline();
                let request = FilterRequest::new()
                    .with_query("e")
                    .with_order(SortOrder::asc("title"));

                let first = pipeline.apply_filter(&store, &request).await.unwrap();
                let second = pipeline.apply_filter(&store, &request).await.unwrap();

                assert_eq!(first.data, second.data);
                assert_eq!(first.pagination, second.pagination);
            }

            #[tokio::test]
            async fn test_type_scoping() {
                let store = $factory;
                let mut about = Post::page("About");
                about.id = 10;
                about.status = listable::core::entity::STATUS_PUBLISH.to_string();
                seed(&store, vec![published(1, "Post", day(1)), about]).await;
                let pipeline = post_pipeline();

                let posts = pipeline
                    .apply_filter(&store, &FilterRequest::new())
                    .await
                    .unwrap();
                assert_eq!(titles(&posts.data), vec!["Post"]);

                let pages = pipeline
                    .apply_filter(&store, &FilterRequest::new().with_type("page"))
                    .await
                    .unwrap();
                assert_eq!(titles(&pages.data), vec!["About"]);
            }

            #[tokio::test]
            async fn test_unknown_type_falls_back() {
                let store = $factory;
                let mut about = Post::page("About");
                about.id = 10;
                seed(&store, vec![draft(1, "Post"), about]).await;

                let request = FilterRequest::new().with_type("article");
                let page = post_pipeline().apply_filter(&store, &request).await.unwrap();

                assert_eq!(titles(&page.data), vec!["Post"]);
            }

            #[tokio::test]
            async fn test_trash_scopes() {
                let store = $factory;
                seed(
                    &store,
                    vec![published(1, "live", day(1)), published(2, "binned", day(2))],
                )
                .await;
                store.soft_delete(2).await.unwrap();
                let pipeline = post_pipeline();

                let live = pipeline
                    .apply_filter(&store, &FilterRequest::new())
                    .await
                    .unwrap();
                assert_eq!(titles(&live.data), vec!["live"]);

                let all = pipeline
                    .apply_filter(&store, &FilterRequest::new().with_trashed())
                    .await
                    .unwrap();
                assert_eq!(titles(&all.data), vec!["binned", "live"]);

                let only = pipeline
                    .apply_filter(&store, &FilterRequest::new().with_trashed().only_trashed())
                    .await
                    .unwrap();
                assert_eq!(titles(&only.data), vec!["binned"]);
            }

            #[tokio::test]
            async fn test_recency_tiebreak() {
                let store = $factory;
                let mut older_created = published(1, "older created", day(3));
                older_created.created_at = day(1);
                let mut newer_created = published(2, "newer created", day(3));
                newer_created.created_at = day(2);
                let unpublished = draft(3, "unpublished");
                seed(
                    &store,
                    vec![
                        older_created,
                        newer_created,
                        unpublished,
                        published(4, "latest", day(8)),
                    ],
                )
                .await;

                let page = post_pipeline()
                    .apply_filter(&store, &FilterRequest::new())
                    .await
                    .unwrap();

                assert_eq!(
                    titles(&page.data),
                    vec!["latest", "newer created", "older created", "unpublished"]
                );
            }

            #[tokio::test]
            async fn test_pagination() {
                let store = $factory;
                let posts = (1..=5)
                    .map(|i| published(i, &format!("p{i}"), day(i as u32)))
                    .collect();
                seed(&store, posts).await;
                let pipeline = post_pipeline();

                let request = FilterRequest::new().with_page(2, 2);
                let page = pipeline.apply_filter(&store, &request).await.unwrap();
                assert_eq!(titles(&page.data), vec!["p3", "p2"]);
                assert_eq!(page.pagination.total, 5);
                assert!(page.pagination.has_next);
                assert!(page.pagination.has_prev);

                let request = FilterRequest::new().with_page(9, 2);
                let page = pipeline.apply_filter(&store, &request).await.unwrap();
                assert!(page.is_empty());
                assert_eq!(page.pagination.total, 5);
            }

            #[tokio::test]
            async fn test_huge_page_is_empty() {
                let store = $factory;
                seed(&store, walkthrough_posts()).await;
                let request: FilterRequest =
                    serde_json::from_value(serde_json::json!({"page": usize::MAX.to_string()}))
                        .unwrap();

                let page = post_pipeline().apply_filter(&store, &request).await.unwrap();

                assert!(page.is_empty());
                assert_eq!(page.pagination.page, usize::MAX);
                assert_eq!(page.pagination.total, 3);
                assert!(!page.pagination.has_next);
            }

            #[tokio::test]
            async fn test_no_match_is_empty_page() {
                let store = $factory;
                seed(&store, walkthrough_posts()).await;

                let request = FilterRequest::new().with_query("no such words");
                let page = post_pipeline().apply_filter(&store, &request).await.unwrap();

                assert!(page.is_empty());
                assert_eq!(page.pagination.total, 0);
            }
        }
    };
}
