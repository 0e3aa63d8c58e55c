//! Default catalog content written to an empty store on first run.

use crate::model::product::Product;

/// Number of records in the default catalog.
pub const DEFAULT_PRODUCT_COUNT: usize = 6;

/// Returns the fixed sample catalog, in display order.
pub fn default_products() -> Vec<Product> {
    vec![
        seed_product(
            "1",
            "Handcrafted Ceramic Mug",
            "A beautiful handcrafted ceramic mug, perfect for your morning coffee or evening tea. Each piece is unique with slight variations in the glaze.",
            "https://images.unsplash.com/photo-1618160702438-9b02ab6515c9",
            "https://etsy.com",
            "Home",
            24.99,
        ),
        seed_product(
            "2",
            "Minimalist Desk Lamp",
            "This sleek desk lamp adds a modern touch to any workspace. Features adjustable brightness and color temperature settings.",
            "https://images.unsplash.com/photo-1721322800607-8c38375eef04",
            "https://amazon.com",
            "Home",
            59.95,
        ),
        seed_product(
            "3",
            "Hand-Knitted Wool Scarf",
            "Stay warm and stylish with this premium wool scarf. Hand-knitted with care using sustainable materials.",
            "https://images.unsplash.com/photo-1582562124811-c09040d0a901",
            "https://etsy.com",
            "Accessories",
            34.50,
        ),
        seed_product(
            "4",
            "Organic Cotton T-shirt",
            "Comfortable everyday t-shirt made from 100% organic cotton. Available in multiple colors and sizes.",
            "https://placehold.co/600x600?text=T-Shirt",
            "https://amazon.com",
            "Clothing",
            19.99,
        ),
        seed_product(
            "5",
            "Artisanal Wooden Cutting Board",
            "This handcrafted cutting board is made from sustainably sourced hardwood. Perfect for food preparation or as a serving platter.",
            "https://placehold.co/600x600?text=Cutting+Board",
            "https://etsy.com",
            "Kitchen",
            45.00,
        ),
        seed_product(
            "6",
            "Digital Art Print",
            "Beautiful digital artwork printed on premium paper. Available in multiple sizes to fit your space perfectly.",
            "https://placehold.co/600x600?text=Art+Print",
            "https://gumroad.com",
            "Art",
            29.99,
        ),
    ]
}

fn seed_product(
    id: &str,
    title: &str,
    description: &str,
    image_url: &str,
    external_url: &str,
    category: &str,
    price: f64,
) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        external_url: external_url.to_string(),
        category: category.to_string(),
        price,
    }
}
