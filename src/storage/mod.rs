//! Storage layer for the ATM ledger
//!
//! [`LedgerStore`] owns every customer and account in memory and mirrors the
//! whole mapping to a single text file. Each save rewrites the file in full.

pub mod file_io;
pub mod format;

pub use file_io::{read_json_file, read_text, write_json_atomic, write_text_atomic};
pub use format::FormatError;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Customer;

/// In-memory ledger backed by a text file
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    customers: BTreeMap<u32, Customer>,
}

impl LedgerStore {
    /// Create an empty store bound to `path`; nothing is read until [`load`](Self::load)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            customers: BTreeMap::new(),
        }
    }

    /// Path of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory mapping with the file's contents
    ///
    /// Returns the number of customers loaded. A missing file yields
    /// `PersistenceUnavailable` and malformed content `PersistenceCorrupt`;
    /// in both cases the store is left empty. Any other read failure is an
    /// `Io` error and the store is left empty as well.
    pub fn load(&mut self) -> LedgerResult<usize> {
        self.customers.clear();

        let Some(text) = read_text(&self.path)? else {
            return Err(LedgerError::PersistenceUnavailable(
                self.path.display().to_string(),
            ));
        };

        let customers = format::parse(&text).map_err(|e| {
            LedgerError::PersistenceCorrupt(format!("{}: {}", self.path.display(), e))
        })?;

        self.customers = customers;
        Ok(self.customers.len())
    }

    /// Write the whole mapping to the ledger file
    pub fn save(&self) -> LedgerResult<()> {
        write_text_atomic(&self.path, &self.to_text())
    }

    /// Serialized form of the current mapping
    pub fn to_text(&self) -> String {
        format::serialize(&self.customers)
    }

    /// Find a customer by number
    pub fn lookup(&self, customer_number: u32) -> Option<&Customer> {
        self.customers.get(&customer_number)
    }

    /// Find a customer by number for mutation
    pub fn lookup_mut(&mut self, customer_number: u32) -> Option<&mut Customer> {
        self.customers.get_mut(&customer_number)
    }

    /// Insert or replace a customer
    pub fn upsert_customer(&mut self, customer: Customer) {
        self.customers.insert(customer.number(), customer);
    }

    /// All customers in ascending number order
    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
