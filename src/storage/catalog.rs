/// Built-in marketplace catalog
///
/// The default product set the server can seed into an empty database. The
/// insight engine's recommendation lookups ("magnesium", "meditation",
/// "resistance") all resolve against these entries.

use crate::domain::{DomainError, Product, ProductCategory};

/// The default catalog, in the order products should be inserted
///
/// Insertion order matters: substring lookups return the first match by
/// rowid, so reordering this list changes which product gets recommended
/// when several names share a fragment.
pub fn default_products() -> Result<Vec<Product>, DomainError> {
    let entries: [(&str, &str, &str, ProductCategory, f64, &str); 14] = [
        (
            "Magnesium Bisglycinate",
            "Premium magnesium for deep, restorative sleep",
            "A highly bioavailable form of magnesium that helps calm the nervous system, supports muscle relaxation and promotes deep REM sleep without morning grogginess.",
            ProductCategory::Sleep,
            24.99,
            "https://images.example.com/products/magnesium-bisglycinate.jpg",
        ),
        (
            "Organic Chamomile Tea Blend",
            "Soothing herbal blend for evening relaxation",
            "Organic chamomile flowers with lavender and passionflower, a caffeine-free bedtime ritual that prepares the body for restful sleep.",
            ProductCategory::Sleep,
            14.99,
            "https://images.example.com/products/chamomile-tea.jpg",
        ),
        (
            "Weighted Silk Sleep Mask",
            "Luxurious blackout mask for uninterrupted sleep",
            "A weighted mulberry-silk mask providing total darkness and gentle calming pressure, breathable and hypoallergenic.",
            ProductCategory::Sleep,
            39.99,
            "https://images.example.com/products/sleep-mask.jpg",
        ),
        (
            "Vitamin D3 + K2 Complex",
            "Sunshine vitamin for energy and immunity",
            "Vitamin D3 (5000 IU) paired with K2 (MK-7) to support energy production, immune function and bone health.",
            ProductCategory::Energy,
            29.99,
            "https://images.example.com/products/vitamin-d3-k2.jpg",
        ),
        (
            "Organic Matcha Powder",
            "Premium Japanese matcha for sustained energy",
            "Ceremonial grade matcha from Uji delivering hours of clean, sustained energy thanks to L-theanine, without the jitters of coffee.",
            ProductCategory::Energy,
            34.99,
            "https://images.example.com/products/matcha-powder.jpg",
        ),
        (
            "B-Complex with Methylfolate",
            "Bioavailable B vitamins for energy metabolism",
            "A comprehensive B-complex in methylated forms for superior absorption, supporting cellular energy and mental clarity.",
            ProductCategory::Energy,
            26.99,
            "https://images.example.com/products/b-complex.jpg",
        ),
        (
            "Collagen Peptides Serum",
            "Marine collagen for youthful, radiant skin",
            "A lightweight serum delivering bioactive marine collagen peptides, with visible improvements in elasticity and hydration over 4-8 weeks.",
            ProductCategory::Skin,
            49.99,
            "https://images.example.com/products/collagen-serum.jpg",
        ),
        (
            "Vitamin C Brightening Powder",
            "Pure L-ascorbic acid for glowing complexion",
            "Pharmaceutical-grade L-ascorbic acid powder mixed fresh into your serum or moisturizer for maximum brightening efficacy.",
            ProductCategory::Skin,
            32.99,
            "https://images.example.com/products/vitamin-c-powder.jpg",
        ),
        (
            "Hyaluronic Acid Complex",
            "Multi-weight hydration for plump skin",
            "Three molecular weights of hyaluronic acid hydrating every skin layer and locking in moisture for over 24 hours.",
            ProductCategory::Skin,
            27.99,
            "https://images.example.com/products/hyaluronic-acid.jpg",
        ),
        (
            "Organic Meditation Cushion",
            "Ergonomic zafu for comfortable practice",
            "A hand-crafted cushion filled with organic buckwheat hulls, promoting proper spinal alignment during sitting practice.",
            ProductCategory::Fitness,
            54.99,
            "https://images.example.com/products/meditation-cushion.jpg",
        ),
        (
            "Cork Yoga Blocks (Set of 2)",
            "Sustainable, sturdy support for your practice",
            "Sustainably harvested cork blocks, naturally antimicrobial, improving form and making poses accessible at every level.",
            ProductCategory::Fitness,
            36.99,
            "https://images.example.com/products/yoga-blocks.jpg",
        ),
        (
            "Plant-Based Protein Powder",
            "Complete amino acid profile for recovery",
            "An organic blend of pea, brown rice and pumpkin seed proteins delivering 25g of clean protein per serving.",
            ProductCategory::Fitness,
            44.99,
            "https://images.example.com/products/protein-powder.jpg",
        ),
        (
            "Resistance Band Set",
            "Versatile bands for strength training anywhere",
            "A five-band set (5-50 lbs) with door anchor, handles and ankle straps for full-body strength training at home or on the road.",
            ProductCategory::Fitness,
            29.99,
            "https://images.example.com/products/resistance-bands.jpg",
        ),
        (
            "Foam Roller with Trigger Points",
            "Deep tissue massage for muscle recovery",
            "A high-density roller with trigger points for myofascial release, flexibility and faster recovery after workouts.",
            ProductCategory::Fitness,
            38.99,
            "https://images.example.com/products/foam-roller.jpg",
        ),
    ];

    let mut products = Vec::with_capacity(entries.len());
    for (name, short_description, description, category, price, image_url) in entries {
        products.push(Product::new(
            name.to_string(),
            short_description.to_string(),
            description.to_string(),
            category,
            price,
            image_url.to_string(),
        )?);
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let products = default_products().unwrap();
        assert_eq!(products.len(), 14);
    }

    #[test]
    fn test_catalog_covers_engine_recommendations() {
        let products = default_products().unwrap();
        for fragment in ["magnesium", "meditation", "resistance"] {
            assert!(
                products
                    .iter()
                    .any(|p| p.name.to_lowercase().contains(fragment)),
                "no catalog entry matches '{}'",
                fragment
            );
        }
    }
}
