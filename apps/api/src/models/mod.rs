pub mod excuse;
