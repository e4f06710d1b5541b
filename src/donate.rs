//! Sadaqah (donation) notice.

pub const DONATION_LINK: &str = "https://buymeacoffee.com/shadowedscroll";

pub fn run_donate() {
    println!("Support Quran Tracker with a sadaqah:");
    println!("  {}", DONATION_LINK);
}
