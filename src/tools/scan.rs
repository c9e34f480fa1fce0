/// Tools running the vision stubs over uploaded photos
///
/// This module implements the food_scan and skin_scan MCP tools. Images
/// arrive base64-encoded in the tool arguments.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::tools::ToolError;
use crate::vision::{
    DetectedFood, FoodRecognizer, NutritionSummary, SkinAnalyzer, SkinAssessment,
};

/// Parameters for scanning a meal photo
#[derive(Debug, Deserialize)]
pub struct FoodScanParams {
    pub image_base64: String,
}

/// Detected items plus the nutrition rollup
#[derive(Debug, Serialize)]
pub struct FoodScanResponse {
    pub items: Vec<DetectedFood>,
    pub nutrition: NutritionSummary,
}

/// Recognize food items in a meal photo
pub fn food_scan<R: FoodRecognizer>(
    recognizer: &R,
    params: FoodScanParams,
) -> Result<FoodScanResponse, ToolError> {
    let image = decode_image(&params.image_base64)?;
    let items = recognizer.recognize(&image)?;
    let nutrition = recognizer.summarize(&items);

    Ok(FoodScanResponse { items, nutrition })
}

/// Parameters for scanning a face photo
#[derive(Debug, Deserialize)]
pub struct SkinScanParams {
    pub image_base64: String,
}

/// The wellness-only skin assessment
#[derive(Debug, Serialize)]
pub struct SkinScanResponse {
    pub assessment: SkinAssessment,
}

/// Run the wellness-only skin analysis over a face photo
pub fn skin_scan<A: SkinAnalyzer>(
    analyzer: &A,
    params: SkinScanParams,
) -> Result<SkinScanResponse, ToolError> {
    let image = decode_image(&params.image_base64)?;
    let assessment = analyzer.analyze(&image)?;

    Ok(SkinScanResponse { assessment })
}

fn decode_image(encoded: &str) -> Result<Vec<u8>, ToolError> {
    BASE64
        .decode(encoded.trim())
        .map_err(|_| ToolError::invalid("image_base64 is not valid base64"))
}
