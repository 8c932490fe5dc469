//! Client and command-line interface for the VinylDNS API
//!
//! Supported features:
//! - Signed requests to every group, zone, record set and batch change endpoint
//! - Automatic paging of list endpoints
//! - Table or JSON output for each command
//!
//! # Example
//! ```no_run
//! use vinyldns::api::ListFilter;
//! use vinyldns::client::Client;
//!
//! # async fn example() -> vinyldns::Result<()> {
//! let client = Client::builder()
//!     .host("https://vinyldns.example.com")
//!     .access_key("your_access_key")
//!     .secret_key("your_secret_key")
//!     .build()?;
//!
//! for zone in client.zones_all(ListFilter::default()).await? {
//!     println!("{} {}", zone.name, zone.id);
//! }
//! # Ok(())
//! # }
//! ```

// Copyright 2023 vinyldns-cli authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.


pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod output;
pub mod resolve;
pub mod utils;

pub use error::{Error, Result};
