//! S3Store tests against LocalStack.

use crate::common::{LocalStackTestContext, unique_bucket};
use bc_traits::ObjectStore;

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_head_object_found_and_missing() {
    let ctx = LocalStackTestContext::new().await;
    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = unique_bucket("bc-head");
    ctx.create_bucket(&bucket).await.unwrap();
    ctx.put_object(&bucket, "backup/data.csv", "a,b\n1,2\n")
        .await
        .unwrap();

    let store = ctx.store(&bucket).await;

    let meta = store.head_object("backup/data.csv").await.unwrap().unwrap();
    assert_eq!(meta.size, Some(8));
    assert!(meta.etag.is_some());

    assert_eq!(store.head_object("backup/missing.csv").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_copy_object_between_buckets() {
    let ctx = LocalStackTestContext::new().await;
    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let source = unique_bucket("bc-copy-src");
    let dest = unique_bucket("bc-copy-dst");
    ctx.create_bucket(&source).await.unwrap();
    ctx.create_bucket(&dest).await.unwrap();
    ctx.put_object(&source, "reports/q1.csv", "q1").await.unwrap();

    let store = ctx.store(&dest).await;
    store.copy_object_from(&source, "reports/q1.csv").await.unwrap();

    assert_eq!(
        ctx.get_object(&dest, "reports/q1.csv").await,
        Some(b"q1".to_vec())
    );
    assert_eq!(
        ctx.get_object(&source, "reports/q1.csv").await,
        Some(b"q1".to_vec())
    );
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_copy_missing_source_key_is_not_found() {
    let ctx = LocalStackTestContext::new().await;
    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let source = unique_bucket("bc-miss-src");
    let dest = unique_bucket("bc-miss-dst");
    ctx.create_bucket(&source).await.unwrap();
    ctx.create_bucket(&dest).await.unwrap();

    let store = ctx.store(&dest).await;
    let err = store
        .copy_object_from(&source, "never/existed.csv")
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {err}");
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_copy_preserves_keys_with_special_characters() {
    let ctx = LocalStackTestContext::new().await;
    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let source = unique_bucket("bc-enc-src");
    let dest = unique_bucket("bc-enc-dst");
    ctx.create_bucket(&source).await.unwrap();
    ctx.create_bucket(&dest).await.unwrap();

    let keys = ["reports/50%25 off.csv", "a+b.csv", "données/backup.csv"];
    for key in keys {
        ctx.put_object(&source, key, key).await.unwrap();
    }
    // Same name with the escape decoded; must not be picked up instead
    ctx.put_object(&source, "reports/50% off.csv", "decoded").await.unwrap();

    let store = ctx.store(&dest).await;
    for key in keys {
        store.copy_object_from(&source, key).await.unwrap();
        assert_eq!(ctx.get_object(&dest, key).await, Some(key.as_bytes().to_vec()));
    }
    assert_eq!(ctx.get_object(&dest, "reports/50% off.csv").await, None);
}
