use rust_decimal::{Decimal, RoundingStrategy};

use super::manifest::{Manifest, ManifestRow, PalletCell, ProductCell};
use super::shipment::ResolvedShipment;

pub const DOCUMENT_TITLE: &str = "STRAIGHT BILL OF LADING";
pub const FALLBACK_PALLET_DIMENSIONS: &str = "48x40x30";
const EMERGENCY_CONTACT: &str = "Emergency Response: Chem Trec 800-424-9300";
const HAZMAT_REGISTRATION: &str = "U.S. DOT Hazmat Reg. No. 091216 554 069YZ";

const STYLE: &str = "\
@page { size: portrait; margin: 0.5in; }
body { font-family: Arial, sans-serif; font-size: 12px; border: 1px solid #003b71; padding: 10px; color: #333; }
.header { text-align: center; font-weight: bold; font-size: 18px; color: #003b71; border-bottom: 2px solid #003b71; padding-bottom: 10px; }
.info-container { display: flex; flex-wrap: wrap; margin: 15px 0; }
.info-col { flex: 1; min-width: 250px; padding: 0 10px; }
.info-item { margin-bottom: 8px; }
.label { font-weight: bold; color: #003b71; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; font-size: 10px; }
th, td { border: 1px solid #003b71; padding: 4px; text-align: left; }
th { background-color: #e6f4ff; color: #003b71; font-size: 9px; }
.hazmat-cell { background-color: #fff3cd; }
.highlight { background-color: #fffacd; padding: 2px 4px; }
.total-row { background-color: #e6f4ff; font-weight: bold; }
.signatures { display: flex; flex-wrap: wrap; margin-top: 20px; }
.signature-col { flex: 1; min-width: 250px; }
.footer { margin-top: 15px; font-size: 11px; text-align: center; font-weight: bold; color: #dc3545; }
@media print { button { display: none !important; } }
";

/// Escapes text for interpolation into HTML element content and attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Two decimals, halves rounded away from zero.
pub fn format_weight(weight: Decimal) -> String {
    format!(
        "{:.2}",
        weight.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// Commodity description: code, bold name, hazmat class when hazardous,
/// packing group and net weight.
pub fn commodity_description(cell: &ProductCell) -> String {
    let mut description = format!(
        "{}, <strong>{}</strong>",
        escape_html(&cell.code),
        escape_html(&cell.name)
    );
    if cell.hazardous {
        description.push_str(&format!(
            ", <span class=\"highlight\">{}</span>",
            escape_html(or_placeholder(&cell.hazmat_class, "N/A"))
        ));
    }
    description.push_str(&format!(
        ", PG: {}, {} lbs Net",
        escape_html(or_placeholder(&cell.packing_group, "N/A")),
        format_weight(cell.net_weight)
    ));
    description
}

fn pallet_dimensions(cell: &PalletCell) -> String {
    escape_html(or_placeholder(&cell.dimensions, FALLBACK_PALLET_DIMENSIONS))
}

fn render_row(row: &ManifestRow) -> String {
    let (unit_type, unit_qty, dimensions) = match &row.pallet {
        Some(pallet) => (
            "Pallet".to_string(),
            pallet.quantity.to_string(),
            pallet_dimensions(pallet),
        ),
        None => (String::new(), String::new(), String::new()),
    };

    let cells = match &row.product {
        Some(product) => [
            unit_type,
            unit_qty,
            escape_html(&product.packaging),
            product.quantity.to_string(),
            if product.hazardous {
                "<span class=\"highlight\">X</span>".to_string()
            } else {
                String::new()
            },
            commodity_description(product),
            format!("{} lbs", format_weight(product.gross_weight)),
            escape_html(&product.freight_class),
            escape_html(&product.nmfc_number),
            dimensions,
            escape_html(or_placeholder(&product.stackable, "No")),
        ],
        None => [
            unit_type,
            unit_qty,
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            dimensions,
            String::new(),
        ],
    };

    let mut html = String::from(if row.is_hazardous() {
        "<tr class=\"hazmat-cell\">"
    } else {
        "<tr>"
    });
    for cell in cells {
        html.push_str(&format!("<td>{}</td>", cell));
    }
    html.push_str("</tr>\n");
    html
}

fn render_address(label: &str, lines: &[String]) -> String {
    let mut html = format!(
        "<div class=\"info-item\"><div class=\"label\">{}</div>",
        label
    );
    for line in lines {
        html.push_str(&format!("<div>{}</div>", escape_html(line)));
    }
    html.push_str("</div>\n");
    html
}

/// Renders the complete standalone HTML document.
pub fn render_document(
    shipment: &ResolvedShipment,
    manifest: &Manifest,
    po_numbers: &[String],
) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!(
        "<title>Bill of Lading - {} - {}</title>\n",
        escape_html(&shipment.consignee.name),
        escape_html(&shipment.ship_date)
    ));
    html.push_str(&format!("<style>\n{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str(&format!("<div class=\"header\">{}</div>\n", DOCUMENT_TITLE));

    html.push_str("<div class=\"info-container\">\n<div class=\"info-col\">\n");
    html.push_str(&format!(
        "<div class=\"info-item\"><span class=\"label\">Date:</span> {}</div>\n",
        escape_html(&shipment.ship_date)
    ));
    let consignee = &shipment.consignee;
    html.push_str(&render_address(
        "TO:",
        &[
            consignee.name.clone(),
            consignee.street.clone(),
            consignee.locality(),
        ],
    ));
    let third_party = &shipment.third_party;
    html.push_str(&render_address(
        "3rd Party freight charges to:",
        &[
            third_party.name.clone(),
            third_party.street.clone(),
            third_party.locality(),
        ],
    ));
    html.push_str("</div>\n<div class=\"info-col\" style=\"text-align: right;\">\n");
    html.push_str(&format!(
        "<div class=\"info-item\"><span class=\"label\">Carrier:</span> {}</div>\n",
        escape_html(&shipment.carrier)
    ));
    let shipper = &shipment.shipper;
    html.push_str(&render_address(
        "FROM:",
        &[
            shipper.name.clone(),
            shipper.street.clone(),
            shipper.locality(),
            format!("Telephone {}", shipment.shipper_phone),
        ],
    ));
    html.push_str(&format!(
        "<div class=\"info-item\"><div><span class=\"label\">Freight Charges:</span> {}</div>\
         <div><span class=\"label\">Placards Supplied?</span> {}</div></div>\n",
        escape_html(&shipment.freight_charges),
        escape_html(&shipment.placards_supplied)
    ));
    html.push_str("</div>\n</div>\n");

    html.push_str(
        "<table>\n<thead>\n\
         <tr><th colspan=\"2\">Handling Unit</th><th colspan=\"2\">Package</th><th colspan=\"7\"></th></tr>\n\
         <tr><th>Type</th><th>Qty</th><th>Type</th><th>Qty</th><th>HM</th>\
         <th>Commodity Description</th><th>Weight (lbs)</th><th>Freight Class</th>\
         <th>NMFC#</th><th>Pallet Dimensions LxWxH</th><th>Stackable?</th></tr>\n\
         </thead>\n<tbody>\n",
    );
    for row in &manifest.rows {
        html.push_str(&render_row(row));
    }
    html.push_str(&format!(
        "<tr class=\"total-row\"><td>Total H/U:</td><td>{}</td><td>Total Packages:</td>\
         <td colspan=\"2\">{}</td><td>Total Shipment Weight:</td><td colspan=\"5\">{} lbs</td></tr>\n",
        manifest.total_handling_units,
        manifest.total_packages,
        format_weight(manifest.total_weight)
    ));
    if !po_numbers.is_empty() {
        let joined = po_numbers.join(", ");
        html.push_str(&format!(
            "<tr><td colspan=\"11\">PO# {}</td></tr>\n",
            escape_html(&joined)
        ));
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str(
        "<p><strong>NOTE:</strong> Liability limitation for loss or damage in this shipment may be \
         applicable. See 49 U.S.C. 14706(c)(1)(A) and (B). This is to certify that the above-named \
         materials are properly classified, described, packaged, marked and labeled, and are in proper \
         condition for transportation according to the applicable regulations of the Department of \
         Transportation.</p>\n",
    );
    html.push_str(&format!(
        "<div class=\"signatures\">\n<div class=\"signature-col\">\
         <div>Shipper: <strong>{}</strong></div><div>Per: {} Date: {}</div></div>\n\
         <div class=\"signature-col\"><div>Carrier: ______________________________</div></div>\n</div>\n",
        escape_html(&shipper.name),
        escape_html(&shipment.signatory),
        escape_html(&shipment.ship_date)
    ));
    html.push_str(&format!(
        "<div class=\"footer\">{} &nbsp;&nbsp; {}</div>\n",
        EMERGENCY_CONTACT, HAZMAT_REGISTRATION
    ));
    html.push_str("<button onclick=\"window.print()\">Print Bill of Lading</button>\n");
    html.push_str("</body>\n</html>\n");
    html
}
