#![allow(dead_code)]

use axum_test::TestServer;
use cookbook::configuration::{
    ApplicationSettings, CacheSettings, ContentSettings, DatabaseSettings, Settings,
};
use cookbook::server::config::configure_app;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate test database");

    pool
}

pub fn test_settings() -> Settings {
    Settings {
        application: ApplicationSettings {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        database: DatabaseSettings::default(),
        cache: CacheSettings::default(),
        content: ContentSettings::default(),
    }
}

pub fn test_server(pool: SqlitePool) -> TestServer {
    test_server_with_settings(pool, test_settings())
}

pub fn test_server_with_settings(pool: SqlitePool, settings: Settings) -> TestServer {
    TestServer::new(configure_app(pool, &settings)).expect("Failed to start test server")
}

pub struct SeedRecipe {
    pub title: &'static str,
    pub cuisine: &'static str,
    pub rating: Option<f64>,
    pub prep_time: i64,
    pub cook_time: i64,
    pub total_time: i64,
    pub description: &'static str,
    pub calories: Option<i64>,
    pub serves: &'static str,
}

pub const SEED_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        title: "Beef Pho",
        cuisine: "Vietnamese",
        rating: Some(4.9),
        prep_time: 30,
        cook_time: 480,
        total_time: 510,
        description: "Slow-simmered beef broth with charred onion and ginger.",
        calories: Some(450),
        serves: "6 servings",
    },
    SeedRecipe {
        title: "Sweet Potato Pie",
        cuisine: "Southern Recipes",
        rating: Some(4.8),
        prep_time: 15,
        cook_time: 100,
        total_time: 115,
        description: "Shared from a southern recipe box, this pie starts with roasted sweet potatoes mashed into a silky custard and baked in a flaky crust.",
        calories: Some(389),
        serves: "8 servings",
    },
    SeedRecipe {
        title: "Chicken Tikka Masala",
        cuisine: "Indian",
        rating: Some(4.7),
        prep_time: 25,
        cook_time: 35,
        total_time: 60,
        description: "Yogurt-marinated chicken in a spiced tomato cream sauce.",
        calories: Some(520),
        serves: "4 servings",
    },
    SeedRecipe {
        title: "Classic Margherita Pizza",
        cuisine: "Italian",
        rating: Some(4.6),
        prep_time: 20,
        cook_time: 10,
        total_time: 30,
        description: "Tomato, mozzarella and basil on a blistered crust.",
        calories: Some(270),
        serves: "2 servings",
    },
    SeedRecipe {
        title: "Fish Tacos",
        cuisine: "Mexican",
        rating: Some(4.4),
        prep_time: 20,
        cook_time: 10,
        total_time: 30,
        description: "Crispy white fish with cabbage slaw and lime crema.",
        calories: Some(310),
        serves: "3 servings",
    },
    SeedRecipe {
        title: "Mushroom Risotto",
        cuisine: "Italian",
        rating: Some(4.3),
        prep_time: 10,
        cook_time: 35,
        total_time: 45,
        description: "Arborio rice stirred with porcini stock and parmesan.",
        calories: Some(420),
        serves: "4 servings",
    },
    SeedRecipe {
        title: "Ratatouille",
        cuisine: "French",
        rating: Some(4.2),
        prep_time: 30,
        cook_time: 45,
        total_time: 75,
        description: "Layered summer vegetables stewed in tomato and herbs.",
        calories: Some(140),
        serves: "4 servings",
    },
    SeedRecipe {
        title: "Caesar Salad",
        cuisine: "American",
        rating: Some(4.1),
        prep_time: 15,
        cook_time: 0,
        total_time: 15,
        description: "Romaine, garlic croutons and anchovy dressing.",
        calories: Some(180),
        serves: "2 servings",
    },
    SeedRecipe {
        title: "Lentil Soup",
        cuisine: "Mediterranean",
        rating: Some(4.0),
        prep_time: 10,
        cook_time: 30,
        total_time: 40,
        description: "Brown lentils with cumin, carrot and a squeeze of lemon.",
        calories: Some(220),
        serves: "6 servings",
    },
    SeedRecipe {
        title: "Pancakes",
        cuisine: "American",
        rating: Some(3.9),
        prep_time: 10,
        cook_time: 15,
        total_time: 25,
        description: "Buttermilk pancakes with a crisp edge.",
        calories: Some(350),
        serves: "4 servings",
    },
    SeedRecipe {
        title: "Green Smoothie",
        cuisine: "American",
        rating: Some(3.5),
        prep_time: 5,
        cook_time: 0,
        total_time: 5,
        description: "Spinach, banana and oat milk.",
        calories: Some(120),
        serves: "1 serving",
    },
    SeedRecipe {
        title: "Unrated Stew",
        cuisine: "American",
        rating: None,
        prep_time: 20,
        cook_time: 90,
        total_time: 110,
        description: "",
        calories: None,
        serves: "4 servings",
    },
];

pub async fn seed_recipes(pool: &SqlitePool) {
    for recipe in SEED_RECIPES {
        let nutrients = match recipe.calories {
            Some(calories) => serde_json::json!({ "calories": calories }).to_string(),
            None => serde_json::json!({}).to_string(),
        };

        sqlx::query(
            "INSERT INTO recipes \
             (cuisine, title, rating, prep_time, cook_time, total_time, description, nutrients, serves) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(recipe.cuisine)
        .bind(recipe.title)
        .bind(recipe.rating)
        .bind(recipe.prep_time)
        .bind(recipe.cook_time)
        .bind(recipe.total_time)
        .bind(recipe.description)
        .bind(nutrients)
        .bind(recipe.serves)
        .execute(pool)
        .await
        .expect("Failed to seed recipe");
    }
}
