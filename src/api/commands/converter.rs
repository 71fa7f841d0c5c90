//! Converter command module
//!
//! Runs conversions for the UI: parse the raw input, convert, format with the
//! current precision and, for `convert_and_record`, log the result.

use crate::context::AppContext;
use crate::core::features::unit_converter::{self, format_result, Category};
use crate::shared::error::AppResult;
use crate::shared::types::{
    CategoryDTO, ConvertUnitsRequest, ConvertUnitsResponse, NewHistoryEntry, QuickCompareItem,
    QuickCompareRequest,
};

/// Every category with its ordered unit table
pub fn list_categories() -> Vec<CategoryDTO> {
    Category::all().iter().copied().map(CategoryDTO::from).collect()
}

/// Convert without touching history
pub fn convert_units(context: &AppContext, request: ConvertUnitsRequest) -> AppResult<ConvertUnitsResponse> {
    let result = run_conversion(&request)?;

    Ok(ConvertUnitsResponse {
        result,
        formatted_result: format_result(result, context.precision()),
        from_unit: request.from_unit,
        to_unit: request.to_unit,
        history_id: None,
    })
}

/// Convert and, on success, record the formatted result in history
pub fn convert_and_record(
    context: &mut AppContext,
    request: ConvertUnitsRequest,
) -> AppResult<ConvertUnitsResponse> {
    let result = run_conversion(&request)?;
    let formatted_result = format_result(result, context.precision());

    let entry = context.history.record(NewHistoryEntry {
        category: request.category,
        value: request.value,
        from_unit: request.from_unit.clone(),
        to_unit: request.to_unit.clone(),
        result: formatted_result.clone(),
    });

    Ok(ConvertUnitsResponse {
        result,
        formatted_result,
        from_unit: request.from_unit,
        to_unit: request.to_unit,
        history_id: Some(entry.id),
    })
}

/// Compare the value against every other unit of its category
pub fn quick_compare(context: &AppContext, request: QuickCompareRequest) -> AppResult<Vec<QuickCompareItem>> {
    let value = unit_converter::parse_value(&request.value)?;
    let items = unit_converter::quick_compare(request.category, value, &request.from_unit, context.precision())?;
    Ok(items)
}

fn run_conversion(request: &ConvertUnitsRequest) -> AppResult<f64> {
    let value = unit_converter::parse_value(&request.value)?;
    unit_converter::convert(request.category, value, &request.from_unit, &request.to_unit).map_err(|e| {
        tracing::debug!(category = %request.category, error = %e, "conversion rejected");
        e.into()
    })
}
