mod common;

use marketplace_api::{
    dto::{
        auth::RegisterRequest,
        categories::CategoryRequest,
        products::ProductRequest,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::Role,
    routes::params::{CategoryQuery, ProductQuery, ProductSortBy, SortOrder},
    services::{auth_service, category_service, product_service, seller_service},
    state::AppState,
    store::sellers,
};

struct Shop {
    user: AuthUser,
    seller_id: i32,
}

async fn open_shop(state: &AppState, name: &str, email: &str) -> anyhow::Result<Shop> {
    let account = auth_service::register_user(
        state,
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            phone: "081234567890".into(),
            password: "Abcdef1!".into(),
            role: "seller".into(),
        },
    )
    .await?
    .data
    .expect("account");
    let mut details = sellers::find_by_user_id(&state.orm, account.id)
        .await?
        .expect("seller profile");
    let seller = details.aggregates.pop().expect("aggregate").seller;
    Ok(Shop {
        user: AuthUser {
            user_id: account.id,
            email: account.email,
            role: Role::Seller,
        },
        seller_id: seller.id,
    })
}

fn product(name: &str, price: f64, category_id: i32, seller_id: i32) -> ProductRequest {
    ProductRequest {
        name: name.into(),
        price,
        stock: 5,
        image: String::new(),
        rating: 4,
        description: format!("{name} description"),
        category_id,
        seller_id,
    }
}

fn all_products(q: Option<&str>) -> ProductQuery {
    ProductQuery {
        page: Some(1),
        per_page: Some(20),
        q: q.map(str::to_string),
        min_price: None,
        max_price: None,
        sort_by: Some(ProductSortBy::Price),
        sort_order: Some(SortOrder::Asc),
    }
}

// Categories and products against a real database.
#[tokio::test]
async fn catalog_lifecycle() -> anyhow::Result<()> {
    let Some(state) = common::database_state().await? else {
        return Ok(());
    };
    let shop = open_shop(&state, "Toko Maju", "shop@example.com").await?;
    let rival = open_shop(&state, "Toko Saingan", "rival@example.com").await?;

    // Category slug is derived from the name and must be unique.
    let created = category_service::create_category(
        &state,
        CategoryRequest {
            name: "Men's Wear".into(),
            slug: Some("custom-slug".into()),
            image: String::new(),
        },
    )
    .await?;
    assert_eq!(created.status_code, 201);
    let category = created.data.expect("category");
    assert_eq!(category.slug, "men'swear");

    let duplicate = category_service::create_category(
        &state,
        CategoryRequest {
            name: "MEN'S wear".into(),
            slug: None,
            image: String::new(),
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    // Updates re-derive the slug and may not take another category's.
    let comics = category_service::create_category(
        &state,
        CategoryRequest {
            name: "Comics".into(),
            slug: None,
            image: String::new(),
        },
    )
    .await?
    .data
    .expect("category");
    let taken = category_service::update_category(
        &state,
        comics.id,
        CategoryRequest {
            name: "Men's Wear".into(),
            slug: None,
            image: String::new(),
        },
    )
    .await;
    assert!(matches!(taken, Err(AppError::Conflict(_))));

    let renamed = category_service::update_category(
        &state,
        comics.id,
        CategoryRequest {
            name: "Graphic Novels".into(),
            slug: Some("gn".into()),
            image: "/uploads/gn.png".into(),
        },
    )
    .await?
    .data
    .expect("category");
    assert_eq!(renamed.slug, "graphicnovels");
    assert_eq!(renamed.image, "/uploads/gn.png");

    let same_name = category_service::update_category(
        &state,
        category.id,
        CategoryRequest {
            name: "Men's Wear".into(),
            slug: Some("men'swear".into()),
            image: String::new(),
        },
    )
    .await?;
    assert_eq!(same_name.data.expect("category").slug, "men'swear");

    let missing = category_service::update_category(
        &state,
        category.id + 100,
        CategoryRequest {
            name: "Nowhere".into(),
            slug: None,
            image: String::new(),
        },
    )
    .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    category_service::delete_category(&state, comics.id).await?;

    // A missing category stops the write before anything is stored.
    let orphan = product_service::create_product(
        &state,
        &shop.user,
        product("Ghost", 10.0, category.id + 100, shop.seller_id),
    )
    .await;
    assert!(matches!(orphan, Err(AppError::NotFound(_))));
    let listed = product_service::list_products(&state, all_products(None)).await?;
    assert_eq!(listed.meta.as_ref().and_then(|m| m.total), Some(0));

    // Sellers may only list products under their own profile.
    let foreign = product_service::create_product(
        &state,
        &shop.user,
        product("Stolen", 10.0, category.id, rival.seller_id),
    )
    .await;
    assert!(matches!(foreign, Err(AppError::Forbidden(_))));

    let shirt = product_service::create_product(
        &state,
        &shop.user,
        product("Linen Shirt", 250_000.0, category.id, shop.seller_id),
    )
    .await?
    .data
    .expect("product");
    assert_eq!(shirt.category_name.as_deref(), Some("Men's Wear"));
    assert_eq!(shirt.seller_name.as_deref(), Some("Toko Maju"));
    product_service::create_product(
        &state,
        &shop.user,
        product("Wool Socks", 40_000.0, category.id, shop.seller_id),
    )
    .await?;

    let page = product_service::list_products(&state, all_products(None)).await?;
    let names: Vec<_> = page
        .data
        .expect("page")
        .items
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Wool Socks", "Linen Shirt"]);

    let searched = product_service::list_products(&state, all_products(Some("linen"))).await?;
    assert_eq!(searched.data.expect("page").items.len(), 1);

    // Wildcard characters in the search term match literally.
    for term in ["%", "_", "Linen%"] {
        let literal = product_service::list_products(&state, all_products(Some(term))).await?;
        assert!(literal.data.expect("page").items.is_empty(), "{term}");
    }

    // Category and seller reads carry their products.
    let with_products = category_service::get_category(&state, category.id)
        .await?
        .data
        .expect("category");
    assert_eq!(with_products.products.len(), 2);

    let seller = seller_service::get_seller(&state, shop.seller_id)
        .await?
        .data
        .expect("seller");
    assert_eq!(seller.products.len(), 2);
    assert!(seller
        .products
        .iter()
        .all(|p| p.category_name.as_deref() == Some("Men's Wear")));

    // Only the owner may change or delete a product.
    let hijack = product_service::delete_product(&state, &rival.user, shirt.id).await;
    assert!(matches!(hijack, Err(AppError::Forbidden(_))));

    let repriced = product_service::update_product(
        &state,
        &shop.user,
        shirt.id,
        product("Linen Shirt", 199_000.0, category.id, shop.seller_id),
    )
    .await?
    .data
    .expect("product");
    assert_eq!(repriced.price, 199_000.0);

    product_service::delete_product(&state, &shop.user, shirt.id).await?;
    let gone = product_service::get_product(&state, shirt.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));

    // Deleted categories disappear from listings and free their slug.
    category_service::delete_category(&state, category.id).await?;
    let remaining = category_service::list_categories(&state, CategoryQuery::default()).await?;
    assert!(remaining.data.expect("list").items.is_empty());
    let recreated = category_service::create_category(
        &state,
        CategoryRequest {
            name: "Men's Wear".into(),
            slug: None,
            image: String::new(),
        },
    )
    .await?;
    assert_eq!(recreated.status_code, 201);
    Ok(())
}
