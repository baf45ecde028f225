//! Shared fixture for shell tests.

use movielens_db::primitives::execute;
use movielens_db::schema::create_schema;
use movielens_db::{Database, DbConfig};

/// Three movies; Toy Story carries 999 ratings so counts need separators.
const FIXTURE: &[&str] = &[
    "INSERT INTO Movies VALUES (1, 'Heat', '1995-12-15', 170, 'en', 60000000, 187436818)",
    "INSERT INTO Movies VALUES (2, 'Star Wars', '1977-05-25', 121, 'en', 11000000, 775398007)",
    "INSERT INTO Movies VALUES (3, 'Toy Story', '1995-10-30', 81, 'en', 30000000, 373554033)",
    "INSERT INTO Ratings VALUES (2, 8), (2, 9), (2, 10)",
    r#"
    WITH RECURSIVE seq(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM seq WHERE i < 999)
    INSERT INTO Ratings (Movie_ID, Rating) SELECT 3, 6 FROM seq
    "#,
    "INSERT INTO Movie_Taglines VALUES (2, 'A long time ago in a galaxy far, far away...')",
    "INSERT INTO Genres VALUES (1, 'Action'), (2, 'Science Fiction')",
    "INSERT INTO Movie_Genres VALUES (2, 2), (2, 1)",
    "INSERT INTO Companies VALUES (1, 'Lucasfilm')",
    "INSERT INTO Movie_Production_Companies VALUES (2, 1)",
];

pub(crate) async fn fixture_db() -> Database {
    let mut db = Database::open(DbConfig::in_memory()).await.unwrap();
    create_schema(db.connection()).await.unwrap();
    for sql in FIXTURE {
        execute(db.connection(), sql, &[]).await.unwrap();
    }
    db
}
