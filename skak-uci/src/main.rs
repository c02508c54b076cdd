//! Entry point of the Skak chess engine. Control is handed straight to
//! the Universal Chess Interface loop on standard input.

mod uci;

use uci::Uci;

fn main() {
    println!("Skak {}", env!("CARGO_PKG_VERSION"));
    let mut uci_main = Uci::new();
    uci_main.main_loop();
}
