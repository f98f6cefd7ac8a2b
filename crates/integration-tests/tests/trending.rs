//! Trending ordering through the listing path: recomputed per call, decay
//! by age, stable for ties.

mod common;

use chrono::{Duration, Utc};
use common::{publish_photo, seed_user, stack};
use domains::ports::PhotoRepo;
use domains::trending;
use uuid::Uuid;

/// Backdates a photo and grants it likes directly in the store.
async fn backdate_with_likes(
    s: &common::Stack,
    owner: Uuid,
    name: &str,
    days_old: i64,
    likes: u32,
) -> Uuid {
    let photo = publish_photo(s, owner, name).await;
    s.store
        .update(photo.id, Box::new(move |p| {
            p.created_at = Utc::now() - Duration::days(days_old);
            p.likes = likes;
            p.likes_by = (0..likes).map(|_| Uuid::new_v4()).collect();
            Ok(())
        }))
        .await
        .unwrap();
    photo.id
}

#[tokio::test]
async fn decayed_score_matches_the_formula() {
    let s = stack();
    let owner = seed_user(&s.store, "owner").await;
    let now = Utc::now();

    let fresh_id = backdate_with_likes(&s, owner, "fresh", 0, 10).await;
    let aged_id = backdate_with_likes(&s, owner, "aged", 9, 10).await;

    let fresh = PhotoRepo::get(s.store.as_ref(), fresh_id).await.unwrap().unwrap();
    let aged = PhotoRepo::get(s.store.as_ref(), aged_id).await.unwrap().unwrap();

    // Fresh photo with 10 likes keeps ~10; nine days halves decay to 0.1.
    assert!((trending::score(&fresh, now) - 10.0).abs() < 0.01);
    assert!((trending::score(&aged, now) - 1.0).abs() < 0.01);
}

#[tokio::test]
async fn hot_listing_sorts_descending_by_score() {
    let s = stack();
    let owner = seed_user(&s.store, "owner").await;

    // Raw chronology: "aged" oldest, then "middle", then "fresh" newest.
    let aged = backdate_with_likes(&s, owner, "aged", 9, 10).await; // ~1.0
    let middle = backdate_with_likes(&s, owner, "middle", 1, 10).await; // ~5.0
    let fresh = backdate_with_likes(&s, owner, "fresh", 0, 2).await; // ~2.0

    let hot = s.engagement.list(true).await.unwrap();
    let order: Vec<Uuid> = hot.iter().map(|p| p.id).collect();
    assert_eq!(order, vec![middle, fresh, aged]);

    // The default ordering stays chronological, newest first.
    let recent = s.engagement.list(false).await.unwrap();
    let order: Vec<Uuid> = recent.iter().map(|p| p.id).collect();
    assert_eq!(order, vec![fresh, middle, aged]);
}

#[tokio::test]
async fn repeated_hot_queries_are_stable() {
    let s = stack();
    let owner = seed_user(&s.store, "owner").await;
    backdate_with_likes(&s, owner, "a", 3, 4).await;
    backdate_with_likes(&s, owner, "b", 1, 2).await;
    backdate_with_likes(&s, owner, "c", 0, 0).await;

    let first: Vec<Uuid> = s.engagement.list(true).await.unwrap().iter().map(|p| p.id).collect();
    let second: Vec<Uuid> = s.engagement.list(true).await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(first, second);
}

#[tokio::test]
async fn zero_like_photos_keep_their_chronological_tie_order() {
    let s = stack();
    let owner = seed_user(&s.store, "owner").await;
    let older = backdate_with_likes(&s, owner, "older", 2, 0).await;
    let newer = backdate_with_likes(&s, owner, "newer", 1, 0).await;

    // All scores are zero; the stable sort keeps newest-first base order.
    let hot = s.engagement.list(true).await.unwrap();
    let order: Vec<Uuid> = hot.iter().map(|p| p.id).collect();
    assert_eq!(order, vec![newer, older]);
}
