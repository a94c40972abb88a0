//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions for rows read from PostgreSQL.
//! Enum columns are stored as text and parsed here.

mod connection;
mod user;
mod workout;
