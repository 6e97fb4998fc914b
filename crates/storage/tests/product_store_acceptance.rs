use shared::domain::{Priority, Product, ProductId};
use storage::{ProductStore, Storage};

fn database_url(dir: &std::path::Path) -> String {
    format!(
        "sqlite://{}",
        dir.join("data")
            .join("wishlist.db")
            .to_string_lossy()
            .replace('\\', "/")
    )
}

#[tokio::test]
async fn collection_written_in_one_session_is_read_by_the_next() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let url = database_url(temp_root.path());

    let products = vec![
        Product {
            id: ProductId(1_712_000_000_001),
            name: "Blush".to_string(),
            image: "http://x/img.png".to_string(),
            price: "49.90".to_string(),
            prioridade: Priority::Alta,
            description: String::new(),
            comprado: true,
        },
        Product {
            id: ProductId(1_712_000_000_002),
            name: "Sérum".to_string(),
            image: "http://x/serum.png".to_string(),
            price: "120".to_string(),
            prioridade: Priority::Media,
            description: "vitamina C".to_string(),
            comprado: false,
        },
    ];

    {
        let storage = Storage::new(&url).await.expect("first session");
        ProductStore::new(storage.clone())
            .save(&products)
            .await
            .expect("save");
        storage.pool().close().await;
    }

    let storage = Storage::new(&url).await.expect("second session");
    let loaded = ProductStore::new(storage).load().await.expect("load");
    assert_eq!(loaded, products);
}
