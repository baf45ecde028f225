//! Shared fixture for repository tests.

use crate::connection::{Database, DbConfig};
use crate::primitives::execute;
use crate::schema::create_schema;

/// Small dataset covering the interesting shapes:
///
/// | id | title              | ratings        | notes                          |
/// |----|--------------------|----------------|--------------------------------|
/// | 1  | Heat               | 7, 8           | tagline stored as NULL         |
/// | 2  | Alien              | 10             | genre list starts with NULL    |
/// | 3  | Toy Story          | 6, 6, 6, 6     | no tagline row                 |
/// | 4  | Unreleased Project | none           | every optional column NULL     |
/// | 5  | Star Wars          | 8, 9, 10       | full details                   |
const FIXTURE: &[&str] = &[
    "INSERT INTO Movies VALUES (1, 'Heat', '1995-12-15', 170, 'en', 60000000, 187436818)",
    "INSERT INTO Movies VALUES (2, 'Alien', '1979-05-25', 117, 'en', 11000000, 104931801)",
    "INSERT INTO Movies VALUES (3, 'Toy Story', '1995-10-30', 81, 'en', 30000000, 373554033)",
    "INSERT INTO Movies VALUES (4, 'Unreleased Project', NULL, NULL, NULL, NULL, NULL)",
    "INSERT INTO Movies VALUES (5, 'Star Wars', '1977-05-25', 121, 'en', 11000000, 775398007)",
    "INSERT INTO Ratings VALUES (1, 7), (1, 8)",
    "INSERT INTO Ratings VALUES (2, 10)",
    "INSERT INTO Ratings VALUES (3, 6), (3, 6), (3, 6), (3, 6)",
    "INSERT INTO Ratings VALUES (5, 8), (5, 9), (5, 10)",
    "INSERT INTO Movie_Taglines VALUES (1, NULL)",
    "INSERT INTO Movie_Taglines VALUES (2, 'In space no one can hear you scream.')",
    "INSERT INTO Movie_Taglines VALUES (5, 'A long time ago in a galaxy far, far away...')",
    "INSERT INTO Genres VALUES (1, 'Action'), (2, 'Science Fiction'), (3, 'Adventure'), (4, 'Crime'), (5, NULL)",
    "INSERT INTO Movie_Genres VALUES (5, 2), (5, 1), (5, 3), (1, 4), (1, 1), (2, 5), (2, 2)",
    "INSERT INTO Companies VALUES (1, 'Lucasfilm'), (2, 'Twentieth Century Fox'), (3, 'Pixar')",
    "INSERT INTO Movie_Production_Companies VALUES (5, 2), (5, 1), (3, 3)",
];

/// Opens an in-memory database with the schema and [`FIXTURE`] loaded.
pub(crate) async fn fixture_db() -> Database {
    let mut db = Database::open(DbConfig::in_memory()).await.unwrap();
    create_schema(db.connection()).await.unwrap();
    for sql in FIXTURE {
        execute(db.connection(), sql, &[]).await.unwrap();
    }
    db
}

/// Opens an in-memory database with the schema but no rows.
pub(crate) async fn empty_db() -> Database {
    let mut db = Database::open(DbConfig::in_memory()).await.unwrap();
    create_schema(db.connection()).await.unwrap();
    db
}
