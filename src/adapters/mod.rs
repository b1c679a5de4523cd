pub mod apper;
