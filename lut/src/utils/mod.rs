pub mod thermistor;
