//! The hardcoded product list the storefront sells from.

use crate::types::{Category, Price, Product, ProductId};

const UNSPLASH_PARAMS: &str = "?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}{UNSPLASH_PARAMS}")
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: u32,
    name: &str,
    brand: &str,
    price: u32,
    photo: &str,
    description: &str,
    category: Category,
    tags: &[&str],
) -> Product {
    let image = unsplash(photo);
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        brand: brand.to_owned(),
        price: Price::npr(price),
        images: vec![image.clone()],
        image,
        description: description.to_owned(),
        category,
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
    }
}

/// The fixture products, in display order.
#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        product(
            1,
            "Dhaka Dash Sneakers",
            "Heritage Hub",
            3800,
            "photo-1595950653106-6c9ebd614d3a",
            "Vibrant sneakers for ages 4–8. Features patterns inspired by traditional Nepali \
             Dhaka textiles with modern athletic comfort.",
            Category::ReadyMade,
            &["Traditional", "Sneakers", "Colorful"],
        ),
        product(
            2,
            "Little Himal Sandals",
            "Peak Performance",
            2400,
            "photo-1562183241-b937e95585b6",
            "Adventure-ready sandals for small explorers (ages 3–7). Sky blue tones inspired \
             by Himalayan peaks, featuring easy-on Velcro straps.",
            Category::ReadyMade,
            &["Outdoor", "Adventure", "Breathable"],
        ),
        product(
            3,
            "Temple Walk School Shoes",
            "Scholar Step",
            3200,
            "photo-1560343090-f0409e92791a",
            "Durable, formal school shoes for ages 5–10. Classic black design with subtle \
             temple-inspired stitching for a touch of heritage.",
            Category::ReadyMade,
            &["Formal", "Durable", "School"],
        ),
        product(
            4,
            "Rhododendron Bloom Shoes",
            "Flora Feet",
            2900,
            "photo-1525966222134-fcfa99b8ae77",
            "Cheerful casual shoes for ages 2–6. Adorned with floral accents inspired by the \
             Lali Guras, Nepal's national flower.",
            Category::ReadyMade,
            &["Floral", "Casual", "Playful"],
        ),
        product(
            7,
            "Design-Your-Own Dreamer",
            "Labs Custom",
            6500,
            "photo-1511556532299-8f662fc26c06",
            "Live Custom Shoe Preview: The ultimate canvas for your child's imagination. Use \
             AI to blend any Nepali motif into their own kicks.",
            Category::Customizable,
            &["Custom", "AI-Powered", "Unique"],
        ),
    ]
}
