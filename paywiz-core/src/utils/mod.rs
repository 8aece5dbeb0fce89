pub mod countdown;
pub mod rubles;
