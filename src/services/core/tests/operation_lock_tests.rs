use super::*;

#[tokio::test]
async fn test_lock_acquisition() {
    let lock = OperationLock::new();
    let guard = lock.acquire().await;
    assert!(guard.is_ok(), "First acquisition should succeed");
}

#[tokio::test]
async fn test_lock_contention() {
    let lock = OperationLock::with_timeout(Duration::from_millis(20));
    // Hold the lock
    let _guard = lock.acquire().await.unwrap();

    // Clones share the same mutex; second acquisition times out
    let lock2 = lock.clone();
    let result = lock2.acquire().await;
    assert!(matches!(result, Err(ClosetError::Busy)));
}

#[tokio::test]
async fn test_lock_release_on_drop() {
    let lock = OperationLock::new();
    {
        let _guard = lock.acquire().await.unwrap();
        // Guard dropped here
    }
    // Should succeed after release
    let result = lock.acquire().await;
    assert!(result.is_ok(), "Should succeed after guard is dropped");
}

#[tokio::test]
async fn test_waiting_writer_gets_lock_when_released() {
    let lock = OperationLock::with_timeout(Duration::from_secs(5));
    let guard = lock.acquire().await.unwrap();

    let waiter = {
        let lock = lock.clone();
        tokio::spawn(async move { lock.acquire().await.is_ok() })
    };

    tokio::time::sleep(Duration::from_millis(10)).await;
    drop(guard);
    assert!(waiter.await.unwrap());
}
