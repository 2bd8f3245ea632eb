//! Build-time reference data: the service menu, agent personas and the
//! promotion the salon ships with.

use crate::models::{Persona, Promotion, PromotionType, Service, ServiceCategory, ServiceGroup};

pub static SERVICE_MENU: &[Service] = &[
    Service {
        id: "1",
        name: "Hydra-Facial",
        price: "₹1,500",
        duration: "60 min",
        category: ServiceCategory::Skin,
        icon: Some("fa-droplet"),
        description: Some("Medical-grade resurfacing that deeply cleanses pores and infuses skin with hydration. Perfect for an instant red-carpet glow with zero downtime."),
        is_popular: true,
    },
    Service {
        id: "2",
        name: "Gold Glow Facial",
        price: "₹1,200",
        duration: "75 min",
        category: ServiceCategory::Skin,
        icon: Some("fa-sparkles"),
        description: Some("Luxury brightening treatment using pure 24K gold extracts to stimulate collagen and improve elasticity. Leaves your skin firm and regally radiant."),
        is_popular: false,
    },
    Service {
        id: "3",
        name: "Signature Haircut",
        price: "₹500",
        duration: "45 min",
        category: ServiceCategory::Hair,
        icon: Some("fa-scissors"),
        description: Some("Precision cut tailored to your face shape. Includes a therapeutic scalp massage, organic wash, and a professional blowout for a runway-ready finish."),
        is_popular: true,
    },
    Service {
        id: "4",
        name: "Keratin Smoothing",
        price: "₹4,500",
        duration: "180 min",
        category: ServiceCategory::Hair,
        icon: Some("fa-wind"),
        description: Some("Elite frizz-control using a formaldehyde-free formula. Deeply repairs the hair cuticle for mirror-like shine and cuts daily styling time in half."),
        is_popular: false,
    },
    Service {
        id: "5",
        name: "Full Body Waxing",
        price: "₹1,200",
        duration: "90 min",
        category: ServiceCategory::Skin,
        icon: Some("fa-leaf"),
        description: Some("Smooth results redefined using premium Italian chocolate wax. Gentle on skin but tough on hair, ensuring velvet-smooth results that last for 4+ weeks."),
        is_popular: false,
    },
    Service {
        id: "6",
        name: "Party Makeup",
        price: "₹2,500",
        duration: "60 min",
        category: ServiceCategory::Makeup,
        icon: Some("fa-wand-magic-sparkles"),
        description: Some("Glamorous, high-definition look using long-wear luxury products. Expertly blended for a flawless finish that looks stunning in person and on camera."),
        is_popular: false,
    },
    Service {
        id: "7",
        name: "Bridal Couture",
        price: "₹15,000",
        duration: "240 min",
        category: ServiceCategory::Makeup,
        icon: Some("fa-gem"),
        description: Some("Bespoke bridal makeover featuring waterproof HD makeup and designer hairstyling. Includes sari/dupatta draping for a breathtaking 12-hour stay."),
        is_popular: true,
    },
];

const MANAGER_INSTRUCTION: &str = r#"You are Maya, the expert manager of Dyra Beauty Parlour.

CORE SYSTEM:
- Guide the user through the 4-step roadmap (Treatment -> Date -> Time -> Name).
- Once the booking is confirmed, tell the user: "Your appointment is saved here! To finalize and notify our team, please click the 'Finalize on WhatsApp' button on your ticket below."

DATA PRIVACY:
- If asked "Where does my data go?", explain: "Your bookings are saved privately by the salon assistant. To ensure the salon owner sees your request, use the WhatsApp button to send a quick notification."

TONE: Professional, sophisticated, luxury."#;

pub static PERSONAS: &[Persona] = &[
    Persona {
        id: "manager",
        name: "Maya",
        role: "Salon Manager",
        description: "Booking & Operations Specialist.",
        instruction: MANAGER_INSTRUCTION,
        icon: "fa-calendar-check",
        color: "bg-rose-500",
    },
    Persona {
        id: "skin",
        name: "Zara",
        role: "Skin Expert",
        description: "Expert in facials and skincare routines.",
        instruction: "You are Zara, a certified skincare specialist. Provide numbered recommendations for skin treatments.",
        icon: "fa-sparkles",
        color: "bg-pink-400",
    },
    Persona {
        id: "hair",
        name: "Elena",
        role: "Style Consultant",
        description: "Visualizes bridal looks and hair styles.",
        instruction: "You are Elena, a creative hair and bridal expert. Use numbered lists for styling.",
        icon: "fa-scissors",
        color: "bg-amber-400",
    },
];

pub fn default_persona() -> &'static Persona {
    &PERSONAS[0]
}

pub fn find_persona(id: &str) -> Option<&'static Persona> {
    PERSONAS.iter().find(|p| p.id == id)
}

/// Case-insensitive exact match on the service name.
pub fn find_service(name: &str) -> Option<&'static Service> {
    let wanted = name.trim().to_lowercase();
    SERVICE_MENU.iter().find(|s| s.name.to_lowercase() == wanted)
}

/// The menu grouped by category, categories in first-appearance order.
pub fn grouped_menu() -> Vec<ServiceGroup> {
    let mut groups: Vec<ServiceGroup> = Vec::new();
    for service in SERVICE_MENU {
        match groups.iter_mut().find(|g| g.category == service.category) {
            Some(group) => group.services.push(service.clone()),
            None => groups.push(ServiceGroup {
                category: service.category,
                services: vec![service.clone()],
            }),
        }
    }
    groups
}

pub fn initial_promotions() -> Vec<Promotion> {
    vec![Promotion {
        id: "promo-1".to_string(),
        code: "GLOW10".to_string(),
        title: "Hydra-Facial Special".to_string(),
        description: "Get 10% OFF on our Signature Hydra-Facial this week! 💖".to_string(),
        discount: "10% OFF".to_string(),
        expiry: "Valid this week".to_string(),
        valid_until: "2025-12-31T23:59:59Z".to_string(),
        kind: PromotionType::Seasonal,
    }]
}
