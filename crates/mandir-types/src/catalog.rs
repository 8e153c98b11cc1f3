//! Static temple content: the pooja price list, bookable time slots,
//! suggested donation amounts and the announcement board.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PoojaService {
    pub id: &'static str,
    pub name: &'static str,
    pub duration: &'static str,
    pub price: u32,
    pub description: &'static str,
}

pub const POOJA_SERVICES: &[PoojaService] = &[
    PoojaService {
        id: "rudrabhishek",
        name: "Rudrabhishek",
        duration: "2 hours",
        price: 1100,
        description: "Complete Rudrabhishek with 11 types of offerings to Lord Shiva",
    },
    PoojaService {
        id: "mahamrityunjaya",
        name: "Mahamrityunjaya Havan",
        duration: "1.5 hours",
        price: 851,
        description: "Special havan for health, longevity and protection",
    },
    PoojaService {
        id: "abhishek",
        name: "Daily Abhishek",
        duration: "30 minutes",
        price: 251,
        description: "Simple abhishek with milk, water and flowers",
    },
    PoojaService {
        id: "special",
        name: "Special Occasion Pooja",
        duration: "3 hours",
        price: 2100,
        description: "Comprehensive pooja for special occasions and festivals",
    },
];

pub const TIME_SLOTS: &[&str] = &[
    "6:00 AM", "7:00 AM", "8:00 AM", "9:00 AM", "10:00 AM",
    "4:00 PM", "5:00 PM", "6:00 PM", "7:00 PM", "8:00 PM",
];

pub const SUGGESTED_DONATIONS: &[u32] = &[500, 1000, 2500, 5000, 10000];

pub fn find_pooja(id: &str) -> Option<&'static PoojaService> {
    POOJA_SERVICES.iter().find(|p| p.id == id)
}

pub fn is_time_slot(slot: &str) -> bool {
    TIME_SLOTS.contains(&slot)
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    Festival,
    Event,
    Maintenance,
    Pooja,
    Announcement,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: AnnouncementKind,
    pub title: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub location: &'static str,
    pub description: &'static str,
    pub highlights: &'static [&'static str],
    pub priority: Priority,
}

pub const ANNOUNCEMENTS: &[Announcement] = &[
    Announcement {
        id: 1,
        kind: AnnouncementKind::Festival,
        title: "Maha Shivratri Celebration 2024",
        date: "2024-03-08",
        time: "6:00 AM - 11:00 PM",
        location: "Main Temple Complex",
        description: "Join us for the grand celebration of Maha Shivratri with special poojas, abhishek, and cultural programs throughout the day.",
        highlights: &[
            "24-hour continuous abhishek",
            "Free prasadam for all devotees",
            "Cultural programs in the evening",
        ],
        priority: Priority::High,
    },
    Announcement {
        id: 2,
        kind: AnnouncementKind::Event,
        title: "Monthly Satsang",
        date: "2024-02-15",
        time: "7:00 PM - 9:00 PM",
        location: "Community Hall",
        description: "Monthly spiritual discourse and bhajan session with renowned speakers. All devotees are welcome.",
        highlights: &[
            "Spiritual discourse by Pandit Ji",
            "Community bhajan session",
            "Refreshments provided",
        ],
        priority: Priority::Medium,
    },
    Announcement {
        id: 3,
        kind: AnnouncementKind::Maintenance,
        title: "Temple Renovation Update",
        date: "2024-02-10",
        time: "All Day",
        location: "East Wing",
        description: "Renovation work in the east wing will continue for another two weeks. Some areas may have restricted access.",
        highlights: &[
            "East wing partially closed",
            "Main temple remains open",
            "Expected completion: March 1st",
        ],
        priority: Priority::Low,
    },
    Announcement {
        id: 4,
        kind: AnnouncementKind::Pooja,
        title: "Special Rudrabhishek",
        date: "2024-02-20",
        time: "6:00 AM - 8:00 AM",
        location: "Main Sanctum",
        description: "Special Rudrabhishek ceremony for the prosperity and well-being of all devotees. Registration required.",
        highlights: &[
            "Limited participation",
            "Registration fee: ₹501",
            "Prasadam included",
        ],
        priority: Priority::Medium,
    },
    Announcement {
        id: 5,
        kind: AnnouncementKind::Announcement,
        title: "New Online Donation System",
        date: "2024-02-05",
        time: "Ongoing",
        location: "Website",
        description: "We have launched a new secure online donation system for your convenience. Now you can contribute from anywhere.",
        highlights: &[
            "Multiple payment options",
            "Instant receipt generation",
            "Mobile-friendly interface",
        ],
        priority: Priority::Medium,
    },
];
