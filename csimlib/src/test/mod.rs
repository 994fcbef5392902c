mod simulator;
mod tests;
