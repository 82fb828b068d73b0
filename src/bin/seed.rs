use axum_storefront::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        categories::{ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories},
        products::ActiveModel as ProductActive,
    },
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};

/// Sections, their sub-categories, and the leaf categories under each sub-category.
const HIERARCHY: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Footwear",
        &[
            ("Men's Footwear", &["Casual", "Formal"]),
            ("Women's Footwear", &["Heels", "Flats", "Boots", "Sports"]),
            ("Kids' Footwear", &["School Shoes", "Sports Shoes", "Flipflops"]),
        ],
    ),
    (
        "Jewellery",
        &[("Bangles", &[]), ("Payal", &[]), ("Necklace", &[])],
    ),
    (
        "Clothes",
        &[
            ("Men's Clothing", &[]),
            ("Women's Clothing", &[]),
            ("Kids' Clothing", &[]),
        ],
    ),
];

/// (name, price in cents, category, discounted, latest)
const PRODUCTS: &[(&str, i64, &str, bool, bool)] = &[
    ("Suede Loafers", 4999, "Casual", false, true),
    ("Oxford Brogues", 8950, "Formal", true, false),
    ("Stiletto Pumps", 6500, "Heels", false, true),
    ("Ankle Boots", 7999, "Boots", true, true),
    ("Velcro School Shoes", 2499, "School Shoes", false, false),
    ("Silver Payal", 1850, "Payal", true, false),
    ("Gold Bangles", 12000, "Bangles", false, true),
    ("Linen Shirt", 3499, "Men's Clothing", false, true),
    ("Summer Dress", 4200, "Women's Clothing", true, false),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    // Products go with their categories through ON DELETE CASCADE.
    let cleared = Categories::delete_many().exec(&orm).await?;
    println!("Cleared {} existing categories", cleared.rows_affected);

    let created = seed_categories(&orm).await?;
    println!("Created {created} categories");

    seed_products(&orm).await?;
    println!("Seed completed");
    Ok(())
}

async fn seed_categories(orm: &DatabaseConnection) -> anyhow::Result<usize> {
    let mut created = 0;
    for (section, subcategories) in HIERARCHY {
        let root = create_category(orm, section, None).await?;
        created += 1;
        for (name, leaves) in *subcategories {
            let sub = create_category(orm, name, Some(root)).await?;
            created += 1;
            for leaf in *leaves {
                create_category(orm, leaf, Some(sub)).await?;
                created += 1;
            }
        }
    }
    Ok(created)
}

async fn create_category(
    orm: &DatabaseConnection,
    name: &str,
    parent_id: Option<i64>,
) -> anyhow::Result<i64> {
    let category = CategoryActive {
        id: NotSet,
        name: Set(name.to_string()),
        parent_id: Set(parent_id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(orm)
    .await?;
    Ok(category.id)
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, cents, category, discounted, latest) in PRODUCTS {
        let Some(category) = Categories::find()
            .filter(CategoryCol::Name.eq(*category))
            .one(orm)
            .await?
        else {
            anyhow::bail!("seed category `{category}` is missing");
        };

        ProductActive {
            id: NotSet,
            name: Set(name.to_string()),
            price: Set(Decimal::new(*cents, 2)),
            category_id: Set(category.id),
            image: Set(None),
            description: Set(String::new()),
            is_discounted: Set(*discounted),
            is_latest: Set(*latest),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(orm)
        .await?;
    }

    println!("Seeded {} products", PRODUCTS.len());
    Ok(())
}
