//! SeaORM entity definitions for PostgreSQL database.
