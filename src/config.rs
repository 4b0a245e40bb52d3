/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::io;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone)]
pub struct Config {
    pub fleet: FleetConfig,
    pub simulation: SimulationConfig,
}

#[derive(Deserialize, Clone)]
pub struct FleetConfig {
    pub n_cars: u8,
    pub capacity: u8,
    pub min_floor: u8,
    pub max_floor: u8,
}

#[derive(Deserialize, Clone)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &str) -> io::Result<Config> {
    let config_str = fs::read_to_string(path)?;
    toml::from_str(&config_str).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
