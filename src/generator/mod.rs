//! Artifacts derived from the reconciled snapshot.
//!
//! | Module      | Output                                  |
//! |-------------|-----------------------------------------|
//! | [`pages`]   | `index.html`, `page{n}.html` listing    |
//! | [`rss`]     | the syndication feed                    |
//! | [`summary`] | `postList.json` plus comment/word totals|
//! | [`readme`]  | the README report                       |

pub mod pages;
pub mod readme;
pub mod rss;
pub mod summary;
