//! Data layer: table model, CSV loading, allow-list filtering and the six
//! slide preparation routines.
//!
//! Architecture:
//! ```text
//!  roubo.csv / populacao.csv / ...
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  decode + parse CSV → RawTables
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  keep allow-listed neighborhoods
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ prepare   │  aggregate + sort → Chart
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod prepare;
