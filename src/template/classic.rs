//! Template 1 — classic business tables

use super::{ReportView, escape_html};
use crate::util::group_thousands;

pub fn render(view: &ReportView<'_>) -> String {
    let analysis = view.analysis;

    let mut payment_rows = String::new();
    for item in &analysis.payment_breakdown {
        payment_rows.push_str(&format!(
            r#"<tr>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; font-size: 14px; color: #333;">{mode}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: right; font-weight: 600; font-size: 14px; color: #2c3e50;">₹{revenue}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: center; font-size: 14px; color: #555;">{count}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: right; font-size: 14px; color: #7f8c8d;">{pct:.1}%</td>
            </tr>
"#,
            mode = escape_html(&item.mode),
            revenue = group_thousands(item.revenue),
            count = item.count,
            pct = item.percentage,
        ));

        if !item.upi_accounts.is_empty() {
            let mut upi_list = String::from(
                "<ul style='margin: 8px 0; padding-left: 20px; list-style: none;'>",
            );
            for account in &item.upi_accounts {
                upi_list.push_str(&format!(
                    "<li style='font-size: 13px; padding: 4px 0; color: #495057;'>• {}: ₹{} ({} vehicles)</li>",
                    escape_html(&account.name),
                    group_thousands(account.amount),
                    account.count,
                ));
            }
            upi_list.push_str("</ul>");
            payment_rows.push_str(&format!(
                r#"<tr>
              <td colspan="4" style="padding: 12px 16px; background-color: #f8f9fa; border-bottom: 1px solid #e9ecef;">
                <strong style="color: #495057; font-size: 13px;">UPI Account Breakdown:</strong>
                {upi_list}
              </td>
            </tr>
"#,
            ));
        }
    }

    let mut service_rows = String::new();
    for item in &analysis.service_breakdown {
        service_rows.push_str(&format!(
            r#"<tr>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; font-size: 14px; color: #333;">{service}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: center; font-size: 14px; color: #555;">{count}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: right; font-weight: 600; font-size: 14px; color: #2c3e50;">₹{revenue}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: right; font-size: 14px; color: #7f8c8d;">₹{avg}</td>
            </tr>
"#,
            service = escape_html(&item.service),
            count = item.count,
            revenue = group_thousands(item.revenue),
            avg = item.average_price.round() as i64,
        ));
    }

    let mut vehicle_rows = String::new();
    for item in &analysis.vehicle_distribution {
        vehicle_rows.push_str(&format!(
            r#"<tr>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; font-size: 14px; color: #333;">{vtype}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: center; font-size: 14px; color: #555;">{count}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: right; font-size: 14px; color: #7f8c8d;">{pct:.1}%</td>
            </tr>
"#,
            vtype = escape_html(&item.vehicle_type),
            count = item.count,
            pct = item.percentage,
        ));
    }

    let mut hourly_rows = String::new();
    for item in &analysis.hourly_breakdown {
        hourly_rows.push_str(&format!(
            r#"<tr>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; font-size: 14px; color: #333;">{display}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: center; font-size: 14px; color: #555;">{count}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: right; font-weight: 600; font-size: 14px; color: #2c3e50;">₹{amount}</td>
            </tr>
"#,
            display = item.display,
            count = item.count,
            amount = group_thousands(item.amount),
        ));
    }

    let comparison_section = if view.comparison.len() > 1 {
        let mut rows = String::new();
        for share in view.comparison {
            rows.push_str(&format!(
                r#"<tr>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; font-size: 14px; color: #333;">{name}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: right; font-weight: 600; font-size: 14px; color: #2c3e50;">₹{revenue}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: center; font-size: 14px; color: #555;">{vehicles}</td>
              <td style="padding: 14px 16px; border-bottom: 1px solid #e9ecef; text-align: right; font-size: 14px; color: #7f8c8d;">{pct:.1}%</td>
            </tr>
"#,
                name = escape_html(&share.location_name),
                revenue = group_thousands(share.revenue),
                vehicles = share.vehicles,
                pct = share.revenue_share,
            ));
        }
        format!(
            r#"<div class="section">
        <h2 class="section-title">🏢 Location Comparison</h2>
        <table class="data-table">
          <thead>
            <tr>
              <th>Location</th>
              <th style="text-align: right;">Revenue</th>
              <th style="text-align: center;">Vehicles</th>
              <th style="text-align: right;">% of Total</th>
            </tr>
          </thead>
          <tbody>
            {rows}
          </tbody>
        </table>
      </div>
"#,
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Daily Business Report - Classic</title>
  <style>
    * {{ margin: 0; padding: 0; box-sizing: border-box; }}
    body {{
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
      background-color: #f5f7fa;
      line-height: 1.6;
    }}
    .email-container {{
      max-width: 650px;
      margin: 0 auto;
      background-color: #ffffff;
      border-radius: 12px;
      overflow: hidden;
      box-shadow: 0 4px 12px rgba(0, 0, 0, 0.08);
    }}
    .header {{
      background: linear-gradient(135deg, #4a5568 0%, #2d3748 100%);
      color: white;
      padding: 32px 24px;
      text-align: center;
    }}
    .header h1 {{ font-size: 26px; font-weight: 600; letter-spacing: -0.5px; }}
    .header .date {{ margin-top: 10px; font-size: 15px; opacity: 0.95; font-weight: 500; }}
    .header .location {{ margin-top: 6px; font-size: 14px; opacity: 0.85; }}
    .content {{ padding: 32px 24px; }}
    .summary-cards {{
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 16px;
      margin-bottom: 32px;
    }}
    .summary-card {{
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      color: white;
      padding: 24px 20px;
      border-radius: 10px;
      text-align: center;
      box-shadow: 0 2px 8px rgba(102, 126, 234, 0.2);
    }}
    .summary-card:nth-child(2) {{ background: linear-gradient(135deg, #f093fb 0%, #f5576c 100%); }}
    .summary-card:nth-child(3) {{ background: linear-gradient(135deg, #4facfe 0%, #00f2fe 100%); }}
    .summary-card .label {{
      font-size: 12px;
      opacity: 0.9;
      text-transform: uppercase;
      letter-spacing: 0.8px;
      font-weight: 600;
      margin-bottom: 8px;
    }}
    .summary-card .value {{ font-size: 28px; font-weight: 700; letter-spacing: -0.5px; }}
    .section {{ margin-bottom: 32px; }}
    .section-title {{
      color: #2c3e50;
      font-size: 18px;
      font-weight: 600;
      margin-bottom: 16px;
      padding-bottom: 10px;
      border-bottom: 3px solid #667eea;
    }}
    .data-table {{
      width: 100%;
      border-collapse: collapse;
      background-color: #fff;
      border-radius: 8px;
      overflow: hidden;
      box-shadow: 0 1px 4px rgba(0, 0, 0, 0.06);
      border: 1px solid #e9ecef;
    }}
    .data-table thead tr {{ background-color: #f8f9fa; border-bottom: 2px solid #dee2e6; }}
    .data-table th {{
      padding: 14px 16px;
      text-align: left;
      font-weight: 600;
      font-size: 13px;
      color: #495057;
      text-transform: uppercase;
      letter-spacing: 0.5px;
    }}
    .footer-note {{
      background-color: #f8f9fa;
      padding: 20px;
      border-radius: 8px;
      border-left: 4px solid #667eea;
      margin-top: 24px;
    }}
    .footer-note p {{ color: #6c757d; font-size: 13px; line-height: 1.6; }}
    .footer {{
      background-color: #f8f9fa;
      padding: 20px 24px;
      border-top: 1px solid #e9ecef;
      text-align: center;
    }}
    .footer p {{ color: #6c757d; font-size: 12px; }}
    @media only screen and (max-width: 600px) {{
      .email-container {{ border-radius: 0; margin: 0; }}
      .content {{ padding: 24px 16px; }}
      .summary-cards {{ grid-template-columns: 1fr; gap: 12px; }}
      .data-table th, .data-table td {{ padding: 10px 12px; font-size: 13px; }}
    }}
  </style>
</head>
<body>
  <div class="email-container">

    <div class="header">
      <h1>📊 Daily Business Report</h1>
      <p class="date">{date}</p>
      <p class="location">📍 {location}</p>
    </div>

    <div class="content">

      <div class="summary-cards">
        <div class="summary-card">
          <div class="label">Total Revenue</div>
          <div class="value">₹{total_revenue}</div>
        </div>
        <div class="summary-card">
          <div class="label">Vehicles Served</div>
          <div class="value">{total_vehicles}</div>
        </div>
        <div class="summary-card">
          <div class="label">Avg Service</div>
          <div class="value">₹{avg_service}</div>
        </div>
      </div>

      {comparison_section}

      <div class="section">
        <h2 class="section-title">💳 Payment Mode Breakdown</h2>
        <table class="data-table">
          <thead>
            <tr>
              <th>Payment Mode</th>
              <th style="text-align: right;">Revenue</th>
              <th style="text-align: center;">Count</th>
              <th style="text-align: right;">% of Total</th>
            </tr>
          </thead>
          <tbody>
            {payment_rows}
          </tbody>
        </table>
      </div>

      <div class="section">
        <h2 class="section-title">🛠️ Service Breakdown</h2>
        <table class="data-table">
          <thead>
            <tr>
              <th>Service Type</th>
              <th style="text-align: center;">Count</th>
              <th style="text-align: right;">Revenue</th>
              <th style="text-align: right;">Avg Price</th>
            </tr>
          </thead>
          <tbody>
            {service_rows}
          </tbody>
        </table>
      </div>

      <div class="section">
        <h2 class="section-title">🚗 Vehicle Type Distribution</h2>
        <table class="data-table">
          <thead>
            <tr>
              <th>Vehicle Type</th>
              <th style="text-align: center;">Count</th>
              <th style="text-align: right;">Percentage</th>
            </tr>
          </thead>
          <tbody>
            {vehicle_rows}
          </tbody>
        </table>
      </div>

      <div class="section">
        <h2 class="section-title">⏰ Hourly Performance</h2>
        <table class="data-table">
          <thead>
            <tr>
              <th>Time</th>
              <th style="text-align: center;">Vehicles</th>
              <th style="text-align: right;">Revenue</th>
            </tr>
          </thead>
          <tbody>
            {hourly_rows}
          </tbody>
        </table>
      </div>

      <div class="footer-note">
        <p>
          📎 This email includes 3 CSV attachments with detailed transaction data, payment breakdowns, and service analysis for your records.
        </p>
      </div>

    </div>

    <div class="footer">
      <p>Report generated on {generated_at}</p>
    </div>

  </div>
</body>
</html>
"#,
        date = view.date_label,
        location = escape_html(view.location_name),
        total_revenue = group_thousands(analysis.total_revenue),
        total_vehicles = analysis.total_vehicles,
        avg_service = analysis.avg_service.round() as i64,
        generated_at = view.generated_at,
    )
}
