//! Configuration parsing for `chore.yml`

pub mod chore;
