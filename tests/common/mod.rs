//! Shared CSV fixtures for integration tests.
//!
//! The fixture dataset deliberately includes the awkward cases: an order
//! with a dangling custid, an order with a dangling bookid, books with an
//! empty publisher, and a customer with an empty phone.

use std::{fs, path::Path};

pub const BOOK_CSV: &str = "\
bookid,bookname,publisher,price,rating
1,The History of Soccer,GoodSports,7000,4.5
2,Soccer Science,Namu,13000,3.8
3,Golf Bible,Daehan Media,35000,4.9
4,Figure Skating Basics,GoodSports,8000,4.0
5,Untitled Pamphlet,,5000,2.5
6,Another Pamphlet,,9000,
";

pub const CUSTOMER_CSV: &str = "\
custid,name,address,phone
1,Jisung Park,Manchester UK,000-5000-0001
2,Yuna Kim,Seoul,000-6000-0001
3,Miran Jang,Gangwon,
";

pub const ORDERS_CSV: &str = "\
orderid,custid,bookid,saleprice,orderdate
1,1,1,6000,2014-07-01
2,1,3,21000,2014-07-03
3,2,4,8000,2014-07-03
4,3,5,5000,2014-07-04
5,2,6,9000,2014-07-05
6,99,1,1000,2014-07-06
7,1,88,2000,2014-07-07
";

/// Write the three fixture files into `dir` under the fixed Madang names.
pub fn write_fixture_dataset(dir: &Path) {
    fs::write(dir.join("Book_madang.csv"), BOOK_CSV).unwrap();
    fs::write(dir.join("Customer_madang.csv"), CUSTOMER_CSV).unwrap();
    fs::write(dir.join("Orders_madang.csv"), ORDERS_CSV).unwrap();
}

/// Data row count of a fixture file (line count minus the header).
pub fn data_rows(csv: &str) -> usize {
    csv.lines().count() - 1
}
