pub mod fixer;
