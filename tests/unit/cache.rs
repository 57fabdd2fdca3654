use super::{Harness, d};
use uuid::Uuid;
use workforce_backend::cache::{CacheKey, RecordKind, WriteScope};

#[tokio::test]
async fn read_started_before_a_write_cannot_publish_stale_data() {
    let h = Harness::new();
    let day = d(2024, 6, 1);
    let key = CacheKey::employee_list(day);

    let slow_read = h.cache.begin_read(key).await;
    h.cache
        .invalidate(RecordKind::Allocation, WriteScope::employee(Uuid::new_v4()))
        .await;
    assert!(!h.cache.complete_read(slow_read, &vec!["stale"]).await);

    let fresh_read = h.cache.begin_read(key).await;
    assert!(h.cache.complete_read(fresh_read, &vec!["fresh"]).await);
    assert_eq!(h.cache.get::<Vec<String>>(&key).await, Some(vec!["fresh".to_string()]));
}

#[tokio::test]
async fn scoped_invalidation_spares_other_subjects() {
    let h = Harness::new();
    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
    for key in [CacheKey::certifications(alice), CacheKey::certifications(bob)] {
        let ticket = h.cache.begin_read(key).await;
        h.cache.complete_read(ticket, &0).await;
    }

    h.cache
        .invalidate(RecordKind::Certification, WriteScope::employee(alice))
        .await;
    assert!(!h.cache.contains(&CacheKey::certifications(alice)).await);
    assert!(h.cache.contains(&CacheKey::certifications(bob)).await);
}
