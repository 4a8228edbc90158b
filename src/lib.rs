pub mod error;
pub mod net;
pub mod phy;
pub mod rmsa;
pub mod sim;
pub mod topo;

#[cfg(test)]
mod test;
