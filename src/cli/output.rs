//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use boatyard::CatalogError;
use boatyard::catalog::{BoatTypeFilter, RecordId, Review};
use boatyard::components::{BoatRow, MapMarker};

/// Writes the reviews of one boat to the given writer.
pub fn write_reviews<W: Write>(
    writer: &mut W,
    boat_id: &RecordId,
    reviews: &[Review],
) -> Result<(), CatalogError> {
    writeln!(writer, "Reviews for boat {boat_id}: {}", reviews.len()).map_err(|e| io_error(&e))?;

    for review in reviews {
        let title = review.title.as_deref().unwrap_or("(no title)");
        let author = review.author_name.as_deref().unwrap_or("unknown");
        let rating = review
            .rating
            .map_or_else(|| "-".to_owned(), |value| value.to_string());
        let written = review
            .created_at
            .map(|at| at.format(" on %Y-%m-%d").to_string())
            .unwrap_or_default();
        writeln!(writer, "  [{rating}/5] {title} by {author}{written}")
            .map_err(|e| io_error(&e))?;
        if let Some(comment) = review.comment.as_deref() {
            writeln!(writer, "      {comment}").map_err(|e| io_error(&e))?;
        }
    }

    Ok(())
}

/// Writes the rows of a boat search to the given writer.
pub fn write_boats<W: Write>(
    writer: &mut W,
    filter: &BoatTypeFilter,
    rows: &[BoatRow],
) -> Result<(), CatalogError> {
    writeln!(writer, "Boats ({filter}): {}", rows.len()).map_err(|e| io_error(&e))?;

    for row in rows {
        let length = row
            .length
            .map_or_else(|| "-".to_owned(), |value| format!("{value} ft"));
        let price = row
            .price
            .map_or_else(|| "-".to_owned(), |value| format!("${value:.2}"));
        writeln!(writer, "  {} {} | {length} | {price}", row.id, row.name)
            .map_err(|e| io_error(&e))?;
    }

    Ok(())
}

/// Writes map markers to the given writer.
pub fn write_markers<W: Write>(writer: &mut W, markers: &[MapMarker]) -> Result<(), CatalogError> {
    for marker in markers {
        writeln!(
            writer,
            "{} ({:.4}, {:.4})",
            marker.title, marker.location.latitude, marker.location.longitude
        )
        .map_err(|e| io_error(&e))?;
    }

    Ok(())
}

fn io_error(error: &io::Error) -> CatalogError {
    CatalogError::Io {
        message: error.to_string(),
    }
}
