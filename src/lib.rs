#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

pub mod config;
pub mod controller;
pub mod db;
pub mod demo;
pub mod error;
pub mod logging;
pub mod model;
pub mod repository;
pub mod service;
