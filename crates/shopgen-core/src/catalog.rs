//! Static sampling pools used by the dataset generator.

/// A product category with the base names products in it are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub base_names: &'static [&'static str],
}

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Christopher", "Nancy", "Daniel", "Lisa", "Matthew", "Betty", "Anthony",
    "Margaret", "Mark", "Sandra", "Donald", "Ashley", "Steven", "Kimberly", "Paul", "Emily",
    "Andrew", "Donna", "Joshua", "Michelle",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore", "Jackson",
    "Martin", "Lee", "Thompson", "White", "Harris", "Sanchez", "Clark", "Ramirez", "Lewis",
    "Robinson", "Walker", "Young", "Allen", "King", "Wright", "Scott", "Torres", "Nguyen", "Hill",
    "Flores", "Green", "Adams",
];

pub const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "company.com",
    "email.com",
];

pub const TIER_SUFFIXES: &[&str] = &[
    "Pro", "Premium", "Deluxe", "Standard", "Elite", "Basic", "Plus", "Max",
];

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Electronics",
        base_names: &[
            "Smartphone", "Laptop", "Tablet", "Headphones", "Smart Watch", "Camera", "Speaker",
            "Monitor", "Keyboard", "Mouse",
        ],
    },
    Category {
        name: "Clothing",
        base_names: &[
            "T-Shirt", "Jeans", "Jacket", "Dress", "Sneakers", "Hat", "Sweater", "Shorts", "Coat",
            "Boots",
        ],
    },
    Category {
        name: "Home & Garden",
        base_names: &[
            "Lamp", "Plant Pot", "Garden Tool", "Cushion", "Curtain", "Rug", "Vase", "Frame",
            "Mirror", "Shelf",
        ],
    },
    Category {
        name: "Books",
        base_names: &[
            "Novel", "Biography", "Cookbook", "Textbook", "Comic", "Dictionary", "Atlas", "Guide",
            "Manual", "Journal",
        ],
    },
    Category {
        name: "Sports & Outdoors",
        base_names: &[
            "Basketball", "Tennis Racket", "Yoga Mat", "Dumbbells", "Bicycle", "Tent", "Backpack",
            "Running Shoes", "Helmet", "Water Bottle",
        ],
    },
    Category {
        name: "Beauty & Personal Care",
        base_names: &[
            "Shampoo", "Face Cream", "Perfume", "Lipstick", "Sunscreen", "Toothbrush", "Hair Dryer",
            "Nail Polish", "Soap", "Lotion",
        ],
    },
    Category {
        name: "Toys & Games",
        base_names: &[
            "Board Game", "Action Figure", "Puzzle", "Doll", "RC Car", "LEGO Set", "Card Game",
            "Building Blocks", "Stuffed Animal", "Art Set",
        ],
    },
    Category {
        name: "Automotive",
        base_names: &[
            "Car Battery", "Tire", "Oil Filter", "Brake Pad", "Air Freshener", "Car Mat",
            "Phone Mount", "Dash Cam", "Jump Starter", "Tool Kit",
        ],
    },
    Category {
        name: "Health & Wellness",
        base_names: &[
            "Vitamins", "Protein Powder", "Yoga Block", "Massage Ball", "Foam Roller",
            "Resistance Band", "Scale", "Thermometer", "First Aid Kit", "Sleep Mask",
        ],
    },
    Category {
        name: "Food & Beverages",
        base_names: &[
            "Coffee Beans", "Tea Set", "Chocolate Box", "Snack Mix", "Energy Bar", "Juice", "Honey",
            "Olive Oil", "Spice Set", "Wine",
        ],
    },
];

pub const REVIEW_TEXTS: &[&str] = &[
    "Great product! Highly recommend.",
    "Good quality for the price.",
    "Not what I expected, but okay.",
    "Excellent value and fast shipping.",
    "Poor quality, disappointed.",
    "Amazing product, exceeded expectations!",
    "Decent product, nothing special.",
    "Love it! Will buy again.",
    "Average quality, could be better.",
    "Outstanding product, very satisfied!",
    "Not worth the money.",
    "Perfect for my needs.",
    "Good but has some flaws.",
    "Best purchase I've made!",
    "Could be improved.",
    "Very happy with this purchase.",
    "Disappointing quality.",
    "Great features and design.",
    "Works as advertised.",
    "Not recommended.",
];

/// Inclusive product price bounds.
pub const PRODUCT_PRICE_MIN: f64 = 9.99;
pub const PRODUCT_PRICE_MAX: f64 = 999.99;

/// Inclusive order total bounds.
pub const ORDER_TOTAL_MIN: f64 = 20.00;
pub const ORDER_TOTAL_MAX: f64 = 1500.00;

pub const MIN_ITEMS_PER_ORDER: usize = 1;
pub const MAX_ITEMS_PER_ORDER: usize = 4;

pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 5;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

pub fn category(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.name == name)
}

/// Round a currency amount to cents.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
