//! Seeds a demo seller, a demo customer and a small catalog. Safe to re-run:
//! rows that already exist are reused.

use marketplace_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    entity::{
        categories as category_entity, products as product_entity, sellers as seller_entity,
        users as user_entity,
    },
    models::Role,
    password::hash_password,
    slug::slugify,
    store::{
        categories::{self, CategoryFields},
        customers::{self, NewCustomer},
        products::{self, ProductFields},
        sellers::{self, NewSeller},
        users::{self, NewUser},
    },
};
use sea_orm::{ConnectionTrait, DatabaseConnection, Order, TransactionTrait};

const DEMO_PASSWORD: &str = "Passw0rd!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;
    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;
    let orm = create_orm_conn(pool);

    let seller = ensure_seller(&orm, "seller@example.com", "Demo Shop", "081234567890").await?;
    let customer = ensure_customer(&orm, "customer@example.com", "Demo Buyer", "089876543210").await?;

    let electronics = ensure_category(&orm, "Electronics").await?;
    let books = ensure_category(&orm, "Books").await?;

    let catalog = [
        ("Wireless Mouse", 149_000.0, 25, &electronics),
        ("Mechanical Keyboard", 899_000.0, 10, &electronics),
        ("Rust in Action", 450_000.0, 7, &books),
    ];
    let (existing, _) = products::find_page(
        &orm,
        products::ProductFilter {
            search: None,
            min_price: None,
            max_price: None,
            sort_by: product_entity::Column::Id,
            order: Order::Asc,
            limit: 100,
            offset: 0,
        },
    )
    .await?;
    for (name, price, stock, category) in catalog {
        if existing.iter().any(|p| p.product.name == name) {
            continue;
        }
        products::create(
            &orm,
            ProductFields {
                name: name.to_string(),
                price,
                stock,
                image: String::new(),
                rating: 0,
                description: format!("{name} from the demo catalog"),
                category_id: category.id,
                seller_id: seller.id,
            },
        )
        .await?;
    }

    tracing::info!(
        seller_id = seller.id,
        customer_user_id = customer.id,
        password = DEMO_PASSWORD,
        "seed completed"
    );
    Ok(())
}

async fn ensure_account<C: ConnectionTrait>(
    db: &C,
    email: &str,
    role: Role,
) -> anyhow::Result<(user_entity::Model, bool)> {
    if let Some(user) = users::find_by_email(db, email).await? {
        return Ok((user, false));
    }
    let user = users::create(
        db,
        NewUser {
            email: email.to_string(),
            password_hash: hash_password(DEMO_PASSWORD)?,
            role,
        },
    )
    .await?;
    Ok((user, true))
}

async fn ensure_seller(
    orm: &DatabaseConnection,
    email: &str,
    name: &str,
    phone: &str,
) -> anyhow::Result<seller_entity::Model> {
    let txn = orm.begin().await?;
    let (user, _) = ensure_account(&txn, email, Role::Seller).await?;
    let seller = match sellers::find_by_user_id(&txn, user.id).await? {
        Some(mut details) => match details.aggregates.pop() {
            Some(aggregate) => aggregate.seller,
            None => anyhow::bail!("seller lookup for user {} returned nothing", user.id),
        },
        None => {
            sellers::create(
                &txn,
                NewSeller {
                    user_id: user.id,
                    name: name.to_string(),
                    phone: phone.to_string(),
                },
            )
            .await?
        }
    };
    txn.commit().await?;
    Ok(seller)
}

async fn ensure_customer(
    orm: &DatabaseConnection,
    email: &str,
    name: &str,
    phone: &str,
) -> anyhow::Result<user_entity::Model> {
    let (user, created) = ensure_account(orm, email, Role::Customer).await?;
    if created || customers::find_by_user_id(orm, user.id).await?.is_none() {
        customers::create(
            orm,
            NewCustomer {
                user_id: user.id,
                name: name.to_string(),
                phone: phone.to_string(),
            },
        )
        .await?;
    }
    Ok(user)
}

async fn ensure_category(
    orm: &DatabaseConnection,
    name: &str,
) -> anyhow::Result<category_entity::Model> {
    let slug = slugify(name);
    if let Some(category) = categories::find_by_slug(orm, &slug).await? {
        return Ok(category);
    }
    Ok(categories::create(
        orm,
        CategoryFields {
            name: name.to_string(),
            slug,
            image: String::new(),
        },
    )
    .await?)
}
