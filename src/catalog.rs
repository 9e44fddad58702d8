//! The fixed set of bundled analyses.
//!
//! Each entry is pure data: a label, a one-line description, and the SQL
//! text. Adding a new analysis means adding an entry here and nothing else.

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub label: &'static str,
    pub description: &'static str,
    pub sql: &'static str,
}

static ENTRIES: [CatalogEntry; 3] = [
    CatalogEntry {
        label: "Full order history (customer and book names)",
        description: "Joins orders with customer and book to show every order, oldest first.",
        sql: "\
SELECT o.orderid,
       c.name AS customer_name,
       b.bookname,
       o.saleprice,
       o.orderdate
FROM orders o
JOIN customer c ON o.custid = c.custid
JOIN book b ON o.bookid = b.bookid
ORDER BY o.orderdate",
    },
    CatalogEntry {
        label: "Total spend per customer",
        description: "Total purchase amount and order count per customer, biggest spender first.",
        sql: "\
SELECT c.custid,
       c.name AS customer_name,
       SUM(o.saleprice) AS total_spent,
       COUNT(*) AS num_orders
FROM orders o
JOIN customer c ON o.custid = c.custid
GROUP BY c.custid, c.name
ORDER BY total_spent DESC",
    },
    CatalogEntry {
        label: "Sales per publisher",
        description: "Total sales amount and order count per publisher, highest sales first.",
        sql: "\
SELECT b.publisher,
       SUM(o.saleprice) AS total_sales,
       COUNT(*) AS num_orders
FROM orders o
JOIN book b ON o.bookid = b.bookid
GROUP BY b.publisher
ORDER BY total_sales DESC",
    },
];

/// All catalog entries, in display order. Entries are addressed 1-based in
/// the UI.
pub fn entries() -> &'static [CatalogEntry] {
    &ENTRIES
}

/// Look up an entry by its 1-based display number.
pub fn get(number: usize) -> Option<&'static CatalogEntry> {
    if number == 0 {
        return None;
    }
    ENTRIES.get(number - 1)
}
