//! Table slot bookkeeping
//!
//! A table holds a given [`SlotKey`] at most once. A reservation takes the
//! first table of the requested type that does not hold the slot.

use shared::models::{SlotKey, Table, TableAvailability, TableCreate, TableType};
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("No {table_type} table available for {slot}")]
    NoAvailability { table_type: TableType, slot: SlotKey },

    #[error("Table {0} not found")]
    NotFound(i64),

    #[error("Table name already exists: {0}")]
    NameExists(String),
}

impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        match &err {
            TableError::NoAvailability { table_type, slot } => {
                AppError::with_message(ErrorCode::NoTableAvailable, err.to_string())
                    .with_detail("table_type", table_type.as_str())
                    .with_detail("date", slot.date.to_string())
                    .with_detail("time_slot", slot.time_slot.clone())
            }
            TableError::NotFound(id) => {
                AppError::with_message(ErrorCode::TableNotFound, err.to_string())
                    .with_detail("id", *id)
            }
            TableError::NameExists(name) => {
                AppError::with_message(ErrorCode::TableNameExists, err.to_string())
                    .with_detail("name", name.clone())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableBook {
    tables: Vec<Table>,
    next_id: i64,
}

impl TableBook {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add_table(&mut self, payload: TableCreate) -> Result<Table, TableError> {
        let name = payload.name.trim().to_string();
        if self.tables.iter().any(|t| t.name.eq_ignore_ascii_case(&name)) {
            return Err(TableError::NameExists(name));
        }

        let table = Table {
            id: self.next_id,
            name,
            table_type: payload.table_type,
            minimum_spend: payload.minimum_spend,
            reserved_slots: Vec::new(),
        };
        self.next_id = table.id + 1;
        self.tables.push(table.clone());
        Ok(table)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn get(&self, id: i64) -> Result<&Table, TableError> {
        self.tables
            .iter()
            .find(|t| t.id == id)
            .ok_or(TableError::NotFound(id))
    }

    /// First table of the type, used to quote a minimum before one is free
    pub fn first_of_type(&self, table_type: TableType) -> Option<&Table> {
        self.tables.iter().find(|t| t.table_type == table_type)
    }

    pub fn find_available(&self, table_type: TableType, slot: &SlotKey) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.table_type == table_type && t.is_free(slot))
    }

    /// Record the slot on the first free table of the type
    ///
    /// Nothing is mutated on failure.
    pub fn reserve(&mut self, table_type: TableType, slot: &SlotKey) -> Result<Table, TableError> {
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.table_type == table_type && t.is_free(slot))
            .ok_or_else(|| TableError::NoAvailability {
                table_type,
                slot: slot.clone(),
            })?;
        table.reserved_slots.push(slot.clone());
        Ok(table.clone())
    }

    /// Free a slot; returns whether the table held it
    pub fn release(&mut self, table_id: i64, slot: &SlotKey) -> Result<bool, TableError> {
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or(TableError::NotFound(table_id))?;
        let before = table.reserved_slots.len();
        table.reserved_slots.retain(|s| s != slot);
        Ok(table.reserved_slots.len() != before)
    }

    pub fn availability(&self, table_type: TableType, slot: SlotKey) -> TableAvailability {
        let free: Vec<&Table> = self
            .tables
            .iter()
            .filter(|t| t.table_type == table_type && t.is_free(&slot))
            .collect();

        TableAvailability {
            table_type,
            available: !free.is_empty(),
            free_tables: free.len(),
            table: free.first().map(|t| (*t).clone()),
            slot,
        }
    }
}

impl Default for TableBook {
    fn default() -> Self {
        Self::new()
    }
}

/// Tables set up on a fresh start
pub fn default_tables() -> Vec<TableCreate> {
    let mut tables = Vec::new();
    let mut push = |prefix: &str, count: usize, table_type: TableType, minimum_spend: f64| {
        for n in 1..=count {
            tables.push(TableCreate {
                name: format!("{} {:02}", prefix, n),
                table_type,
                minimum_spend,
            });
        }
    };
    push("Standard Table", 6, TableType::Standard, 5_000.0);
    push("VIP Table", 3, TableType::Vip, 10_000.0);
    push("Lounge Booth", 2, TableType::Lounge, 7_500.0);
    push("Grill Terrace", 2, TableType::Grill, 3_000.0);
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn slot(time: &str) -> SlotKey {
        SlotKey::new(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(), time)
    }

    fn vip(name: &str) -> TableCreate {
        TableCreate {
            name: name.to_string(),
            table_type: TableType::Vip,
            minimum_spend: 10_000.0,
        }
    }

    #[test]
    fn test_one_free_table_then_exhausted() {
        let mut book = TableBook::new();
        book.add_table(vip("VIP Table 01")).unwrap();

        let table = book.reserve(TableType::Vip, &slot("19:00")).unwrap();
        assert_eq!(table.reserved_slots, vec![slot("19:00")]);

        let err = book.reserve(TableType::Vip, &slot("19:00")).unwrap_err();
        assert_eq!(
            err,
            TableError::NoAvailability {
                table_type: TableType::Vip,
                slot: slot("19:00"),
            }
        );
        assert_eq!(book.tables()[0].reserved_slots.len(), 1);

        // other slot on the same table is still free
        assert!(book.reserve(TableType::Vip, &slot("21:00")).is_ok());
    }

    #[test]
    fn test_zero_tables_mutates_nothing() {
        let mut book = TableBook::new();
        book.add_table(vip("VIP Table 01")).unwrap();
        let before = book.tables().to_vec();

        let err = book.reserve(TableType::Grill, &slot("19:00")).unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::NoTableAvailable);
        assert!(app.message.contains("GRILL"));
        assert!(app.message.contains("2026-11-01 19:00"));
        assert_eq!(book.tables(), before.as_slice());
    }

    #[test]
    fn test_release_frees_slot() {
        let mut book = TableBook::new();
        let table = book.add_table(vip("VIP Table 01")).unwrap();
        book.reserve(TableType::Vip, &slot("19:00")).unwrap();

        assert!(book.release(table.id, &slot("19:00")).unwrap());
        assert!(!book.release(table.id, &slot("19:00")).unwrap());
        assert!(book.find_available(TableType::Vip, &slot("19:00")).is_some());
        assert_eq!(book.release(99, &slot("19:00")), Err(TableError::NotFound(99)));
    }

    #[test]
    fn test_reserve_picks_first_free() {
        let mut book = TableBook::new();
        book.add_table(vip("VIP Table 01")).unwrap();
        book.add_table(vip("VIP Table 02")).unwrap();

        let a = book.reserve(TableType::Vip, &slot("19:00")).unwrap();
        let b = book.reserve(TableType::Vip, &slot("19:00")).unwrap();
        assert_eq!(a.name, "VIP Table 01");
        assert_eq!(b.name, "VIP Table 02");

        let availability = book.availability(TableType::Vip, slot("19:00"));
        assert!(!availability.available);
        assert_eq!(availability.free_tables, 0);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut book = TableBook::new();
        book.add_table(vip("VIP Table 01")).unwrap();
        assert!(matches!(
            book.add_table(vip("vip table 01")),
            Err(TableError::NameExists(_))
        ));
    }

    #[test]
    fn test_default_tables_unique() {
        let mut book = TableBook::new();
        for t in default_tables() {
            book.add_table(t).unwrap();
        }
        assert_eq!(book.tables().len(), 13);
    }
}
