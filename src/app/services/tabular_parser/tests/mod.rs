//! Test fixtures shared across tabular parser tests


/// A small well-formed delivery export
pub fn sample_csv() -> &'static str {
    "Date,Customer,Sales,Gallon Qty\n\
     2024-01-05,Acme Fuels,100.50,50\n\
     2024-01-06,Baker Farms,200.00,80\n\
     2024-01-07,Acme Fuels,150.25,60\n"
}
