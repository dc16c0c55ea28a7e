// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Errors raised by the almanac core.
///
/// A lookup that finds nothing is not an error: it is reported as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The storage layer failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The bundled migrations could not be applied.
    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// An operation that needs a stored identifier was called without one.
    #[error("An identifier is required for this operation")]
    MissingId,

    /// A date, time or timestamp is out of range.
    #[error("Invalid date or time: {0}")]
    InvalidDate(#[from] jiff::Error),

    /// The configuration could not be resolved.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Filesystem access failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
