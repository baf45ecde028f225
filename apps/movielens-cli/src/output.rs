//! Text and JSON rendering of query results.
//!
//! Writers are generic so the interactive loop and the tests can render into
//! stdout or a `Vec<u8>` alike.

use std::fmt::Display;
use std::io::{self, Write};

use serde::Serialize;

use movielens_core::{Movie, MovieDetails, MovieRating, Quantity};

/// Placeholder for values the dataset does not have.
const MISSING: &str = "N/A";

/// Formats an integer with `,` thousands separators.
///
/// ## Example
/// ```rust
/// use movielens_cli::output::thousands;
///
/// assert_eq!(thousands(1234567), "1,234,567");
/// assert_eq!(thousands(-1000), "-1,000");
/// ```
pub fn thousands(value: i64) -> String {
    group_digits(value < 0, &value.unsigned_abs().to_string(), "")
}

/// Like [`thousands`], keeping any fractional digits: `1,234.5`.
fn thousands_quantity(value: Quantity) -> String {
    match value {
        Quantity::Whole(v) => thousands(v),
        Quantity::Fractional(v) => {
            let text = v.abs().to_string();
            let (digits, fraction) = match text.split_once('.') {
                Some((digits, fraction)) => (digits.to_string(), format!(".{}", fraction)),
                None => (text, String::new()),
            };
            group_digits(v < 0.0, &digits, &fraction)
        }
    }
}

fn group_digits(negative: bool, digits: &str, suffix: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + suffix.len() + 1);

    if negative {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push_str(suffix);
    grouped
}

fn or_missing<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn dollars(value: Option<Quantity>) -> String {
    value.map_or_else(
        || MISSING.to_string(),
        |v| format!("${} (USD)", thousands_quantity(v)),
    )
}

/// `5 : Star Wars (1977)`
pub fn write_movie_line<W: Write>(out: &mut W, movie: &Movie) -> io::Result<()> {
    writeln!(
        out,
        "{} : {} ({})",
        movie.movie_id,
        movie.title,
        or_missing(movie.release_year)
    )
}

/// `5 : Star Wars (1977), avg rating =  9.00 (3 reviews)`
pub fn write_rating_line<W: Write>(out: &mut W, movie: &MovieRating) -> io::Result<()> {
    writeln!(
        out,
        "{} : {} ({}), avg rating =  {:.2} ({} reviews)",
        movie.movie_id,
        movie.title,
        or_missing(movie.release_year),
        movie.avg_rating,
        movie.num_reviews
    )
}

/// Multi-line details block.
///
/// Genre and company lists print as `name, ` repeated, trailing separator
/// included.
pub fn write_details<W: Write>(out: &mut W, details: &MovieDetails) -> io::Result<()> {
    writeln!(out, "{} : {}", details.movie_id, details.title)?;
    writeln!(out, " Release date: {}", or_missing(details.release_date.as_deref()))?;
    match details.runtime {
        Some(runtime) => writeln!(out, " Runtime: {} (mins)", runtime)?,
        None => writeln!(out, " Runtime: {}", MISSING)?,
    }
    writeln!(
        out,
        " Orig language: {}",
        or_missing(details.original_language.as_deref())
    )?;
    writeln!(out, " Budget: {}", dollars(details.budget))?;
    writeln!(out, " Revenue: {}", dollars(details.revenue))?;
    writeln!(out, " Num reviews: {}", details.num_reviews)?;
    writeln!(out, " Avg rating: {:.2} (0..10)", details.avg_rating)?;

    write!(out, " Genres: ")?;
    for genre in &details.genres {
        write!(out, "{}, ", genre)?;
    }
    writeln!(out)?;

    write!(out, " Production Companies: ")?;
    for company in &details.production_companies {
        write!(out, "{}, ", company)?;
    }
    writeln!(out)?;

    writeln!(out, " Tagline: {}", details.tagline)
}

/// Pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
