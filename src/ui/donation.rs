// Donation panel
// Static text asking users to support the project

const DONATION_LINES: &[&str] = &[
    "-- Support this project --",
    "Booking is free to use and maintained in spare time.",
    "If it saves you time, consider a small donation.",
    "Every contribution goes towards hosting and development.",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct DonationPanel;

impl DonationPanel {
    pub fn render(&self) -> Vec<String> {
        DONATION_LINES.iter().map(|line| line.to_string()).collect()
    }
}
