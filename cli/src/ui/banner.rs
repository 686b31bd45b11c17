//! Banner and header printing.

/// Print the application banner.
pub fn print_banner() {
    println!("\n\x1b[1;36m╔══════════════════════════════════════╗\x1b[0m");
    println!("\x1b[1;36m║\x1b[0m           \x1b[1mQR Panel\x1b[0m                   \x1b[1;36m║\x1b[0m");
    println!("\x1b[1;36m║\x1b[0m    QR code generator and dashboard   \x1b[1;36m║\x1b[0m");
    println!("\x1b[1;36m╚══════════════════════════════════════╝\x1b[0m\n");
}
