//! # Seed Data Generator
//!
//! Populates a development database with synthetic MovieLens data.
//!
//! ## Usage
//! ```bash
//! # Generate 200 movies (default) into ./MovieLens_dev.db
//! cargo run -p movielens-db --features seed --bin seed
//!
//! # Generate custom amount
//! cargo run -p movielens-db --features seed --bin seed -- --movies 2000
//!
//! # Specify database path
//! cargo run -p movielens-db --features seed --bin seed -- --db ./data/MovieLens.db
//! ```
//!
//! ## Generated Data
//! The output is deterministic: the same `--movies` count always yields the
//! same rows.
//! - Titles: `{Adjective} {Noun}`, with a sequel number once pairs repeat
//! - Release dates between 1950 and 2019; every 17th movie has none
//! - 1-3 genres and 0-2 production companies per movie
//! - A tagline for two movies out of three
//! - 0-24 ratings per movie, spread over 0..=10

use clap::Parser;
use movielens_db::primitives::execute;
use movielens_db::schema::create_schema;
use movielens_db::{Database, DbConfig, SqlValue};

const ADJECTIVES: &[&str] = &[
    "Silent", "Crimson", "Last", "Hidden", "Broken", "Golden", "Midnight", "Forgotten", "Electric",
    "Distant", "Savage", "Endless", "Hollow", "Burning", "Frozen", "Wandering",
];

const NOUNS: &[&str] = &[
    "Horizon", "Empire", "Harbor", "Garden", "Machine", "Frontier", "Witness", "Kingdom", "Signal",
    "Voyage", "Orchard", "Protocol", "Lantern", "Circus",
];

const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Fantasy",
    "Horror",
    "Mystery",
    "Romance",
    "Science Fiction",
    "Thriller",
    "Western",
];

const COMPANIES: &[&str] = &[
    "Aurora Pictures",
    "Blue Door Films",
    "Cinder Studios",
    "Driftwood Entertainment",
    "Eastgate Productions",
    "Foxglove Media",
    "Granite Films",
];

const LANGUAGES: &[&str] = &["en", "en", "en", "fr", "es", "ja", "de", "it", "ko"];

const TAGLINES: &[&str] = &[
    "Some doors should stay closed.",
    "The journey is only the beginning.",
    "Nobody walks away clean.",
    "Every legend starts somewhere.",
    "The truth was never the point.",
    "One night changes everything.",
];

/// Development seed tool for the MovieLens schema.
#[derive(Debug, Parser)]
#[command(name = "seed", version, about = "MovieLens seed data generator")]
struct Args {
    /// Number of movies to generate
    #[arg(short, long, default_value_t = 200)]
    movies: usize,

    /// Database file path (created if missing)
    #[arg(short, long, default_value = "./MovieLens_dev.db")]
    db: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 MovieLens Seed Data Generator");
    println!("================================");
    println!("Database: {}", args.db);
    println!("Movies:   {}", args.movies);
    println!();

    let config = DbConfig::new(&args.db).create_if_missing(true);
    let mut db = Database::open(config).await?;
    if !db.health_check().await {
        return Err(format!("database at {} is not responding", args.db).into());
    }
    create_schema(db.connection()).await?;

    println!("✓ Connected to database");
    println!("✓ Schema ensured");

    let existing = db.stats().count_movies().await?;
    if existing > 0 {
        println!("⚠ Database already has {} movies", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating lookup tables...");
    for (idx, name) in GENRES.iter().enumerate() {
        execute(
            db.connection(),
            "INSERT INTO Genres (Genre_ID, Genre_Name) VALUES (?, ?)",
            &[(idx as i64 + 1).into(), (*name).into()],
        )
        .await?;
    }
    for (idx, name) in COMPANIES.iter().enumerate() {
        execute(
            db.connection(),
            "INSERT INTO Companies (Company_ID, Company_Name) VALUES (?, ?)",
            &[(idx as i64 + 1).into(), (*name).into()],
        )
        .await?;
    }

    println!("Generating movies...");
    let start = std::time::Instant::now();
    let mut ratings = 0;

    for seed in 0..args.movies {
        let movie = generate_movie(seed);
        let movie_id = movie.id;

        execute(
            db.connection(),
            r#"
            INSERT INTO Movies
                (Movie_ID, Title, Release_Date, Runtime, Original_Language, Budget, Revenue)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            &movie.params(),
        )
        .await?;

        for genre_id in pick_ids(seed, 1 + seed % 3, GENRES.len()) {
            execute(
                db.connection(),
                "INSERT INTO Movie_Genres (Movie_ID, Genre_ID) VALUES (?, ?)",
                &[movie_id.into(), genre_id.into()],
            )
            .await?;
        }

        for company_id in pick_ids(seed * 3, seed % 3, COMPANIES.len()) {
            execute(
                db.connection(),
                "INSERT INTO Movie_Production_Companies (Movie_ID, Company_ID) VALUES (?, ?)",
                &[movie_id.into(), company_id.into()],
            )
            .await?;
        }

        if seed % 3 != 0 {
            execute(
                db.connection(),
                "INSERT INTO Movie_Taglines (Movie_ID, Tagline) VALUES (?, ?)",
                &[movie_id.into(), TAGLINES[seed % TAGLINES.len()].into()],
            )
            .await?;
        }

        for rating in generate_ratings(seed) {
            db.reviews().add(movie_id, rating).await?;
            ratings += 1;
        }

        if (seed + 1) % 100 == 0 {
            println!("  Generated {} movies...", seed + 1);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} movies and {} ratings in {:?}",
        args.movies, ratings, elapsed
    );

    // Verify the query layer sees the data
    println!();
    println!("Verifying...");
    let top = db.movies().top_rated(5, 10).await?;
    println!("  Top 5 with 10+ reviews: {} results", top.len());
    let hits = db.movies().search_by_name("%Empire%").await?;
    println!("  Search '%Empire%': {} results", hits.len());

    db.close().await?;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

struct GeneratedMovie {
    id: i64,
    title: String,
    release_date: Option<String>,
    runtime: i64,
    language: &'static str,
    budget: Option<i64>,
    revenue: Option<i64>,
}

impl GeneratedMovie {
    fn params(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.title.clone().into(),
            self.release_date.clone().into(),
            self.runtime.into(),
            self.language.into(),
            self.budget.into(),
            self.revenue.into(),
        ]
    }
}

/// Generates a single movie from its index.
fn generate_movie(seed: usize) -> GeneratedMovie {
    let adjective = ADJECTIVES[seed % ADJECTIVES.len()];
    let noun = NOUNS[(seed / ADJECTIVES.len() + seed * 5) % NOUNS.len()];
    let pairs = ADJECTIVES.len() * NOUNS.len();
    let title = match seed / pairs {
        0 => format!("{} {}", adjective, noun),
        round => format!("{} {} {}", adjective, noun, round + 1),
    };

    let release_date = (seed % 17 != 0).then(|| {
        format!(
            "{}-{:02}-{:02}",
            1950 + (seed * 7) % 70,
            1 + (seed * 5) % 12,
            1 + (seed * 11) % 28
        )
    });

    // Budget: $1M - $200M, unknown for every 11th movie
    let budget = (seed % 11 != 0).then(|| 1_000_000 * (1 + (seed as i64 * 37) % 200));
    let revenue = budget.map(|b| b * (20 + (seed as i64 * 13) % 280) / 100);

    GeneratedMovie {
        id: seed as i64 + 1,
        title,
        release_date,
        runtime: 75 + (seed as i64 * 19) % 110,
        language: LANGUAGES[seed % LANGUAGES.len()],
        budget,
        revenue,
    }
}

/// Picks `count` distinct 1-based ids from `1..=len`.
fn pick_ids(seed: usize, count: usize, len: usize) -> Vec<i64> {
    (0..count.min(len))
        .map(|k| ((seed + k * 5) % len) as i64 + 1)
        .fold(Vec::new(), |mut ids, id| {
            if !ids.contains(&id) {
                ids.push(id);
            }
            ids
        })
}

/// Generates the ratings for one movie, skewed per movie so averages differ.
fn generate_ratings(seed: usize) -> Vec<i64> {
    let count = (seed * 7) % 25;
    let bias = (seed % 5) as i64;
    (0..count)
        .map(|k| ((k as i64 * 3 + seed as i64) % 7 + bias).min(10))
        .collect()
}
