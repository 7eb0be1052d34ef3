//! # Repository Module
//!
//! Database repository implementations for Paddock.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.horses().get_by_id(7)                                       │
//! │       ▼                                                                 │
//! │  HorseRepository                 CartRepository                        │
//! │  ├── list_all()                  ├── add(horse_id)                     │
//! │  ├── get_by_id(id)               ├── list_lines()                      │
//! │  ├── insert(new_horse)           └── remove(entry_id)                  │
//! │  ├── update(horse)                      ▲                              │
//! │  └── delete(id) ── cascades ────────────┘                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`HorseRepository`](horse::HorseRepository) - Horse CRUD
//! - [`CartRepository`](cart::CartRepository) - Cart entries

pub mod cart;
pub mod horse;
