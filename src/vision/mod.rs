/// Vision analysis stubs for food and skin scans
///
/// Both analyzers are trait-backed stubs producing plausible randomized
/// results; a real computer-vision backend slots in behind the same traits.
/// The skin analyzer reports wellness and cosmetic metrics only, never
/// anything resembling a medical diagnosis.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

/// Errors from the vision layer
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    #[error("Medical term '{0}' detected in skin analysis output")]
    MedicalTermDetected(String),
}

/// Medical terms that must never appear in skin analysis output
const BLOCKED_MEDICAL_TERMS: &[&str] = &[
    "acne",
    "eczema",
    "psoriasis",
    "rosacea",
    "melanoma",
    "dermatitis",
    "lesion",
    "disease",
    "infection",
];

/// Reference servings for the stub food table
struct FoodEntry {
    item: &'static str,
    avg_serving_g: u32,
    calories_per_100g: u32,
}

const FOOD_TABLE: &[FoodEntry] = &[
    FoodEntry { item: "pasta", avg_serving_g: 150, calories_per_100g: 131 },
    FoodEntry { item: "broccoli", avg_serving_g: 80, calories_per_100g: 34 },
    FoodEntry { item: "chicken breast", avg_serving_g: 120, calories_per_100g: 165 },
    FoodEntry { item: "salmon", avg_serving_g: 150, calories_per_100g: 206 },
    FoodEntry { item: "rice", avg_serving_g: 150, calories_per_100g: 130 },
    FoodEntry { item: "salad", avg_serving_g: 100, calories_per_100g: 15 },
    FoodEntry { item: "bread", avg_serving_g: 50, calories_per_100g: 265 },
    FoodEntry { item: "banana", avg_serving_g: 120, calories_per_100g: 89 },
    FoodEntry { item: "apple", avg_serving_g: 180, calories_per_100g: 52 },
    FoodEntry { item: "orange", avg_serving_g: 150, calories_per_100g: 47 },
    FoodEntry { item: "carrot", avg_serving_g: 60, calories_per_100g: 41 },
    FoodEntry { item: "tomato", avg_serving_g: 100, calories_per_100g: 18 },
    FoodEntry { item: "avocado", avg_serving_g: 150, calories_per_100g: 160 },
    FoodEntry { item: "eggs", avg_serving_g: 50, calories_per_100g: 155 },
    FoodEntry { item: "yogurt", avg_serving_g: 200, calories_per_100g: 59 },
];

/// One food item detected in a meal photo
#[derive(Debug, Clone, Serialize)]
pub struct DetectedFood {
    pub item: String,
    pub qty_g: u32,
    pub calories: u32,
    pub confidence: f64,
}

/// Nutritional rollup of a detected meal
#[derive(Debug, Clone, Serialize)]
pub struct NutritionSummary {
    pub total_calories: u32,
    pub total_weight_g: u32,
    pub meal_type: String,
    pub balance_score: String,
}

/// Food recognition backend
pub trait FoodRecognizer {
    /// Detect food items in a meal photo
    fn recognize(&self, image: &[u8]) -> Result<Vec<DetectedFood>, VisionError>;

    /// Roll up nutrition for a set of detected items
    fn summarize(&self, items: &[DetectedFood]) -> NutritionSummary {
        NutritionSummary {
            total_calories: items.iter().map(|i| i.calories).sum(),
            total_weight_g: items.iter().map(|i| i.qty_g).sum(),
            meal_type: classify_meal_type(items),
            balance_score: balance_score(items).to_string(),
        }
    }
}

/// Stub recognizer returning 2-3 plausible items with randomized servings
pub struct RandomFoodRecognizer;

impl FoodRecognizer for RandomFoodRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<Vec<DetectedFood>, VisionError> {
        validate_image(image)?;

        let mut rng = rand::rng();
        let num_items = rng.random_range(2..=3);

        let detected = FOOD_TABLE
            .choose_multiple(&mut rng, num_items)
            .map(|food| {
                let variance = rng.random_range(0.8..1.2);
                let qty = (food.avg_serving_g as f64 * variance) as u32;
                let confidence: f64 = rng.random_range(0.75..0.95);
                DetectedFood {
                    item: food.item.to_string(),
                    qty_g: qty,
                    calories: ((qty as f64 / 100.0) * food.calories_per_100g as f64) as u32,
                    confidence: (confidence * 100.0).round() / 100.0,
                }
            })
            .collect();

        Ok(detected)
    }
}

fn classify_meal_type(items: &[DetectedFood]) -> String {
    let joined = items
        .iter()
        .map(|i| i.item.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    if ["eggs", "bread", "yogurt", "banana"].iter().any(|t| joined.contains(t)) {
        "breakfast".to_string()
    } else if ["salad", "chicken", "rice"].iter().any(|t| joined.contains(t)) {
        "lunch".to_string()
    } else {
        "dinner".to_string()
    }
}

fn balance_score(items: &[DetectedFood]) -> &'static str {
    if items.len() >= 3 {
        "balanced"
    } else if items.len() == 2 {
        "moderate"
    } else {
        "needs_variety"
    }
}

/// Product and routine suggestions attached to a skin assessment
#[derive(Debug, Clone, Serialize)]
pub struct SkinRecommendations {
    pub products: Vec<String>,
    pub routine: Vec<String>,
}

/// Wellness-only skin assessment; no field carries a medical meaning
#[derive(Debug, Clone, Serialize)]
pub struct SkinAssessment {
    pub hydration_level: String,
    pub pore_visibility: String,
    pub fine_lines: String,
    pub skin_tone: String,
    pub radiance: String,
    pub texture: String,
    pub overall_score: u32,
    pub recommendations: SkinRecommendations,
}

/// Skin analysis backend
pub trait SkinAnalyzer {
    /// Analyze a face photo for wellness metrics only
    fn analyze(&self, image: &[u8]) -> Result<SkinAssessment, VisionError>;
}

/// Stub analyzer producing randomized cosmetic metrics
pub struct RandomSkinAnalyzer;

impl SkinAnalyzer for RandomSkinAnalyzer {
    fn analyze(&self, image: &[u8]) -> Result<SkinAssessment, VisionError> {
        validate_image(image)?;

        let mut rng = rand::rng();
        let pick = |rng: &mut _, options: &[&str]| -> String {
            options
                .choose(rng)
                .map(|s| s.to_string())
                .unwrap_or_default()
        };

        let mut assessment = SkinAssessment {
            hydration_level: pick(&mut rng, &["low", "medium", "high"]),
            pore_visibility: pick(&mut rng, &["minimal", "visible", "prominent"]),
            fine_lines: pick(&mut rng, &["minimal", "moderate", "visible"]),
            skin_tone: pick(&mut rng, &["even", "slightly_uneven"]),
            radiance: pick(&mut rng, &["dull", "normal", "radiant"]),
            texture: pick(&mut rng, &["smooth", "normal", "rough"]),
            overall_score: rng.random_range(60..=95),
            recommendations: SkinRecommendations {
                products: Vec::new(),
                routine: Vec::new(),
            },
        };
        assessment.recommendations = recommend(&assessment);

        ensure_wellness_only(&assessment)?;
        Ok(assessment)
    }
}

fn recommend(assessment: &SkinAssessment) -> SkinRecommendations {
    let mut products = Vec::new();
    let mut routine = Vec::new();

    if assessment.hydration_level == "low" {
        products.push("Hyaluronic Acid Complex".to_string());
        routine.push("Drink 2L water daily".to_string());
    }
    if matches!(assessment.pore_visibility.as_str(), "visible" | "prominent") {
        products.push("Vitamin C Brightening Powder".to_string());
        routine.push("Gentle exfoliation 2x weekly".to_string());
    }
    if matches!(assessment.fine_lines.as_str(), "moderate" | "visible") {
        products.push("Collagen Peptides Serum".to_string());
        routine.push("Apply moisturizer morning & night".to_string());
    }
    if assessment.radiance == "dull" {
        products.push("Vitamin C Brightening Powder".to_string());
        routine.push("Get 7-8 hours sleep".to_string());
    }

    SkinRecommendations { products, routine }
}

/// Guard against any medical term leaking into the response text
fn ensure_wellness_only(assessment: &SkinAssessment) -> Result<(), VisionError> {
    let texts = assessment
        .recommendations
        .products
        .iter()
        .chain(assessment.recommendations.routine.iter());

    for text in texts {
        let lower = text.to_lowercase();
        for term in BLOCKED_MEDICAL_TERMS {
            if lower.contains(term) {
                return Err(VisionError::MedicalTermDetected(term.to_string()));
            }
        }
    }
    Ok(())
}

/// Reject empty payloads and anything that is not a PNG or JPEG
fn validate_image(image: &[u8]) -> Result<(), VisionError> {
    if image.is_empty() {
        return Err(VisionError::InvalidImage("empty payload".to_string()));
    }
    let is_png = image.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    let is_jpeg = image.starts_with(&[0xFF, 0xD8, 0xFF]);
    if !is_png && !is_jpeg {
        return Err(VisionError::InvalidImage(
            "unsupported format, expected PNG or JPEG".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00];

    #[test]
    fn test_rejects_empty_and_unknown_payloads() {
        let recognizer = RandomFoodRecognizer;
        assert!(recognizer.recognize(&[]).is_err());
        assert!(recognizer.recognize(b"definitely not an image").is_err());
    }

    #[test]
    fn test_recognizes_two_or_three_distinct_items() {
        let recognizer = RandomFoodRecognizer;
        for _ in 0..20 {
            let items = recognizer.recognize(PNG_HEADER).unwrap();
            assert!(items.len() == 2 || items.len() == 3);

            let mut names: Vec<&str> = items.iter().map(|i| i.item.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), items.len());

            for item in &items {
                assert!(item.confidence >= 0.75 && item.confidence <= 0.95);
                assert!(item.qty_g > 0);
            }
        }
    }

    #[test]
    fn test_summary_totals_and_balance() {
        let recognizer = RandomFoodRecognizer;
        let items = vec![
            DetectedFood { item: "eggs".to_string(), qty_g: 50, calories: 77, confidence: 0.9 },
            DetectedFood { item: "bread".to_string(), qty_g: 50, calories: 132, confidence: 0.8 },
        ];

        let summary = recognizer.summarize(&items);
        assert_eq!(summary.total_calories, 209);
        assert_eq!(summary.total_weight_g, 100);
        assert_eq!(summary.meal_type, "breakfast");
        assert_eq!(summary.balance_score, "moderate");
    }

    #[test]
    fn test_meal_type_fallback_is_dinner() {
        let recognizer = RandomFoodRecognizer;
        let items = vec![DetectedFood {
            item: "salmon".to_string(),
            qty_g: 150,
            calories: 309,
            confidence: 0.85,
        }];

        let summary = recognizer.summarize(&items);
        assert_eq!(summary.meal_type, "dinner");
        assert_eq!(summary.balance_score, "needs_variety");
    }

    #[test]
    fn test_skin_assessment_is_wellness_only() {
        let analyzer = RandomSkinAnalyzer;
        for _ in 0..20 {
            let assessment = analyzer.analyze(JPEG_HEADER).unwrap();
            assert!(assessment.overall_score >= 60 && assessment.overall_score <= 95);

            let json = serde_json::to_string(&assessment).unwrap().to_lowercase();
            for term in BLOCKED_MEDICAL_TERMS {
                assert!(!json.contains(term), "found blocked term {}", term);
            }
        }
    }

    #[test]
    fn test_low_hydration_drives_recommendations() {
        let assessment = SkinAssessment {
            hydration_level: "low".to_string(),
            pore_visibility: "minimal".to_string(),
            fine_lines: "minimal".to_string(),
            skin_tone: "even".to_string(),
            radiance: "normal".to_string(),
            texture: "smooth".to_string(),
            overall_score: 80,
            recommendations: SkinRecommendations { products: Vec::new(), routine: Vec::new() },
        };

        let recs = recommend(&assessment);
        assert!(recs.products.iter().any(|p| p.contains("Hyaluronic")));
        assert!(recs.routine.iter().any(|r| r.contains("2L")));
    }
}
