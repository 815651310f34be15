//! One module per bank statement layout. Formats are genuinely different
//! (delimiters, date order, header markers), so nothing is generalized
//! across them beyond the shared model types.

pub mod akbank_cc_csv;
pub mod qnb_cc_xls;
