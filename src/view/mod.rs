//! Dashboard Page
//!
//! Server-rendered HTML for the single dashboard page: the Connect button,
//! the linked-accounts table and the Assets / Earnings / Total tabs.
//! Only the public widget key is ever written into the page.

mod format;

pub use format::{
    escape_html, format_amount, format_nonzero, format_optional, format_raw, js_string,
};

use std::fmt::Write;

use crate::dashboard::DashboardState;
use crate::portfolio::{earning_amount, purchase_amount};
use crate::provider::{Asset, Earning};
use crate::store::LinkedAccount;

/// Placeholder for an absent or empty collection
pub const NO_DATA: &str = "No Data!";

const CONNECT_SCRIPT_URL: &str = "https://connect.withmono.com/connect.js";

/// Everything the page needs
pub struct PageContext<'a> {
    pub public_key: &'a str,
    pub state: &'a DashboardState,
    pub linked_accounts: &'a [LinkedAccount],
}

/// Render the whole dashboard page
pub fn render_page(ctx: &PageContext<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Investy</title>
<style>{style}</style>
</head>
<body>
<div class="container">
  <h1>Investy</h1>
  <hr>
  <div class="row">
    <div class="left">
      <p>Our Assets API Endpoint provides all assets that a connected customer currently holds in
      their various investment accounts. Information such as the name of the asset, the type e.g
      stock, the cost, the returns currency, symbol, price etc are all returned.</p>
      <button id="link-account" class="btn" type="button">Link Account with Mono</button>
      {accounts}
    </div>
    <div class="right">
      <div class="card tabs">
        <input type="radio" name="tab" id="tab-assets" checked>
        <label for="tab-assets">Assets</label>
        <input type="radio" name="tab" id="tab-earnings">
        <label for="tab-earnings">Earnings</label>
        <input type="radio" name="tab" id="tab-total">
        <label for="tab-total">Total</label>
        <div class="panel" id="panel-assets">{assets}</div>
        <div class="panel" id="panel-earnings">{earnings}</div>
        <div class="panel" id="panel-total">{total}</div>
      </div>
    </div>
  </div>
</div>
<script src="{connect_url}"></script>
<script>{script}</script>
</body>
</html>
"#,
        style = STYLE,
        accounts = render_linked_accounts(ctx.linked_accounts),
        assets = render_assets_tab(ctx.state.assets.as_deref()),
        earnings = render_earnings_tab(ctx.state.earnings.as_deref()),
        total = render_total_tab(ctx.state),
        connect_url = CONNECT_SCRIPT_URL,
        script = render_script(ctx.public_key),
    )
}

/// Assets tab: one block per asset with its derived purchase amount
pub fn render_assets_tab(assets: Option<&[Asset]>) -> String {
    let assets = match assets {
        Some(assets) if !assets.is_empty() => assets,
        _ => return no_data(),
    };

    let mut html = String::from(r#"<div class="box">"#);
    for asset in assets {
        let _ = write!(
            html,
            r#"<ul class="item">
<li><span>Name: </span>{name}</li>
<li><span>Type: </span>{kind}</li>
<li><span>Cost: </span>{cost}</li>
<li><span>Return: </span>{ret}</li>
<li><span>Quantity: </span>{quantity}</li>
<li><span>Currency: </span>{currency}</li>
</ul>
<ul class="details">
<li><span>Purchase Amount: </span>{purchase}</li>
</ul>
<hr>"#,
            name = escape_html(&asset.name),
            kind = escape_html(&asset.asset_type),
            cost = format_amount(asset.cost / 100.0),
            ret = asset.return_amount.map(format_amount).unwrap_or_default(),
            quantity = format_raw(asset.quantity),
            currency = escape_html(&asset.currency),
            purchase = format_amount(purchase_amount(asset)),
        );
    }
    html.push_str("</div>");
    html
}

/// Earnings tab: one block per earning with its nested asset fields
pub fn render_earnings_tab(earnings: Option<&[Earning]>) -> String {
    let earnings = match earnings {
        Some(earnings) if !earnings.is_empty() => earnings,
        _ => return no_data(),
    };

    let mut html = String::from(r#"<div class="box">"#);
    for earning in earnings {
        let _ = write!(
            html,
            r#"<ul class="item">
<li><span>Amount: </span>{amount}</li>
<li><span>Narration: </span>{narration}</li>
<li><span>Date: </span>{date}</li>
</ul>
<ul class="details">
<li><span>Name: </span>{asset_name}</li>
<li><span>Price: </span>{price}</li>
<li><span>Quantity Sold: </span>{sold}</li>
</ul>
<hr>"#,
            amount = format_amount(earning_amount(earning)),
            narration = escape_html(&earning.narration),
            date = escape_html(&earning.date),
            asset_name = escape_html(&earning.asset.name),
            price = format_optional(earning.asset.sale_price),
            sold = format_nonzero(earning.asset.quantity_sold),
        );
    }
    html.push_str("</div>");
    html
}

/// Total tab
pub fn render_total_tab(state: &DashboardState) -> String {
    format!(
        r#"<div class="box">
<h2>Assets</h2>
<h3>Total Purchase Amount: <span>USD {purchase}</span></h3>
<hr>
<h2>Earnings</h2>
<h3>Total Earnings: <span>{earnings}</span></h3>
</div>"#,
        purchase = format_amount(state.total_purchase_amount),
        earnings = format_amount(state.total_earnings),
    )
}

/// Linked-accounts table with an unlink button per row
pub fn render_linked_accounts(accounts: &[LinkedAccount]) -> String {
    let mut html = String::from(
        r#"<table class="accounts">
<thead><tr><th>Customer Name</th><th>Account Linked</th><th>Date Linked</th><th>Action</th></tr></thead>
<tbody>"#,
    );

    if accounts.is_empty() {
        html.push_str(r#"<tr><td colspan="4" class="empty">No linked accounts</td></tr>"#);
    }

    for account in accounts {
        let linked_at = account
            .linked_at
            .map(|at| at.format("%B %-d, %Y").to_string())
            .unwrap_or_default();

        // Records without an id predate unlink support
        let action = if account.account_id.is_empty() {
            String::new()
        } else {
            format!(
                r#"<button class="unlink" type="button" data-account-id="{}">Unlink Account</button>"#,
                escape_html(account.account_id.as_str())
            )
        };

        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&account.name),
            escape_html(&account.institution_name),
            linked_at,
            action,
        );
    }

    html.push_str("</tbody></table>");
    html
}

fn no_data() -> String {
    format!(r#"<div class="box"><h3>{}</h3></div>"#, NO_DATA)
}

fn render_script(public_key: &str) -> String {
    format!(
        r#"
const connect = new Connect({{
  key: {key},
  onClose: () => console.log("Widget closed"),
  onLoad: () => console.log("Widget loaded successfully"),
  onSuccess: ({{ code }}) => {{
    fetch("/api/v1/link", {{
      method: "POST",
      headers: {{ "Content-Type": "application/json" }},
      body: JSON.stringify({{ code }}),
    }})
      .then(() => window.location.reload())
      .catch((err) => console.log(err));
  }},
}});
connect.setup();
document.getElementById("link-account").addEventListener("click", () => connect.open());
document.querySelectorAll("button.unlink").forEach((button) => {{
  button.addEventListener("click", () => {{
    const id = encodeURIComponent(button.dataset.accountId);
    fetch("/api/v1/accounts/" + id, {{ method: "DELETE" }})
      .then(() => window.location.reload())
      .catch((err) => console.log(err));
  }});
}});
"#,
        key = js_string(public_key),
    )
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; }
.container { max-width: 1100px; margin: 60px auto; padding: 0 16px; }
.row { display: flex; gap: 32px; flex-wrap: wrap; }
.left, .right { flex: 1 1 420px; }
.btn { background: #1677ff; color: #fff; border: 0; border-radius: 6px; padding: 10px 20px; font-size: 16px; cursor: pointer; }
table.accounts { width: 100%; margin-top: 48px; border-collapse: collapse; }
table.accounts th, table.accounts td { text-align: left; padding: 8px; border-bottom: 1px solid #e5e7eb; }
.unlink { background: #fff1f0; color: #cf1322; border: 1px solid #ffa39e; border-radius: 4px; cursor: pointer; }
.card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 16px; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: 8px 16px; cursor: pointer; border-bottom: 2px solid transparent; }
.tabs > input:checked + label { border-bottom-color: #1677ff; color: #1677ff; }
.panel { display: none; padding-top: 16px; }
#tab-assets:checked ~ #panel-assets, #tab-earnings:checked ~ #panel-earnings, #tab-total:checked ~ #panel-total { display: block; }
.box ul { list-style: none; padding: 0; margin: 8px 0; }
.box span { font-weight: 600; }
"#;
