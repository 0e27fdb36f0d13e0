//! Turn entries in memory into a patched offer document
//!
//! Two entry points share the classifier and the renderers: the legacy
//! batch path keeps the data file's line order, the regeneration path
//! sorts alphabetically, inserts section headers and refreshes the scalar
//! template fields (list number, date, title, WhatsApp contact).

pub mod patch;
pub mod row;
pub mod script;

use crate::emit::patch::{patch, splice_between, splice_number, PatchError, Region};
use crate::emit::row::TableBody;
use crate::emit::script::{Rows, Vars};
use crate::lib::entry::Entry;

/// Title string the template ships with, replaced document-wide
const TEMPLATE_TITLE: &str = "S.S.D PHARMA";
/// WhatsApp contact the template ships with, replaced document-wide
const TEMPLATE_WHATSAPP: &str = "923337068868";

/// Scalar fields of the regenerated document
#[derive(Debug, Clone)]
pub struct ListMeta {
    pub list_no: String,
    pub list_date: String,
    pub title: String,
    pub whatsapp: String,
}

impl Default for ListMeta {
    fn default() -> Self {
        Self {
            list_no: "000001".to_string(),
            list_date: chrono::Local::now().format("%d/%m/%Y").to_string(),
            title: TEMPLATE_TITLE.to_string(),
            whatsapp: TEMPLATE_WHATSAPP.to_string(),
        }
    }
}

/// Compile in document order, without section headers (legacy batch path)
pub fn compile_ordered(entries: &[Entry], template: &str) -> Result<String, PatchError> {
    let mut document = template.to_string();
    normalize_serial_header(&mut document);
    patch(&document, &fragments(entries, false))
}

/// Compile alphabetically with section headers and scalar fields
pub fn compile_sorted(
    entries: &[Entry],
    template: &str,
    meta: &ListMeta,
) -> Result<String, PatchError> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| e.name().to_uppercase());

    let mut document = template.replace(TEMPLATE_TITLE, &meta.title);
    document = document.replace(TEMPLATE_WHATSAPP, &meta.whatsapp);
    normalize_serial_header(&mut document);
    substitute_scalars(&mut document, meta, sorted.len());
    patch(&document, &fragments(&sorted, true))
}

/// One fragment per region, in `Region` discriminant order
fn fragments(entries: &[Entry], sections: bool) -> [String; Region::COUNT] {
    let table = TableBody::from(entries);
    let table = if sections { table.with_sections() } else { table };
    [
        // TableBody
        table.to_string(),
        // PrintVars
        Vars::full(entries).to_string(),
        // PrintRows
        Rows::print(entries).to_string(),
        // WhatsappBody: variables then conditionals, one region
        format!("{}\n{}", Vars::simple(entries), Rows::whatsapp(entries)),
        // PreviewVars
        Vars::full(entries).to_string(),
        // PreviewRows
        Rows::preview(entries).to_string(),
        // PdfVars
        Vars::create_rows(entries).to_string(),
        // PdfRows
        Rows::pdf(entries).to_string(),
    ]
}

/// Rewrite the legacy "Code" column header to "Sr#"
fn normalize_serial_header(document: &mut String) {
    splice_between(
        document,
        &["<td style=\"text-align: center; border-radius: 16px 0px 0px 0px;\">"],
        "</td>",
        "Sr#",
    );
}

/// Refresh every scalar field the regeneration path owns
///
/// All substitutions are best-effort: a template variant lacking one of the
/// markers keeps its old text, only the eight regions fail closed.
fn substitute_scalars(document: &mut String, meta: &ListMeta, count: usize) {
    splice_number(
        document,
        &["<b>List No : </b>"],
        &[],
        &format!("\n{}", meta.list_no),
    );
    splice_number(
        document,
        &["<b>List Date </b> :"],
        &['/'],
        &format!("\n{}", meta.list_date),
    );
    splice_between(document, &["var LISTNO_GLOBAL = \""], "\"", &meta.list_no);
    splice_between(document, &["var WHATSAPP_GLOBAL = \""], "\"", &meta.whatsapp);
    splice_between(
        document,
        &["id=\"rows\" value=\""],
        "\"",
        &count.to_string(),
    );
    splice_between(
        document,
        &["for (let i = 1; i <= "],
        "; i++)",
        &count.to_string(),
    );
    for function in ["function Printf(){", "function mywht(){", "function myfun(){"] {
        splice_between(document, &[function, "var ITDATE = \""], "\"", &meta.list_date);
        splice_between(document, &[function, "var LSTNO = \""], "\"", &meta.list_no);
    }
}

/// A minimal document honoring the full anchor contract
#[cfg(test)]
pub(crate) fn test_template() -> String {
    String::from(
        r#"<html><head><title>S.S.D PHARMA</title></head>
<body>
<b>List No : </b>
000001
<b>List Date </b> :
01/01/2020
<input type="hidden" id="rows" value="2">
<table><thead><tr><td style="text-align: center; border-radius: 16px 0px 0px 0px;">Code</td></tr></thead>
<tbody id="myTable">OLDROWS</tbody></table>
<script>
var LISTNO_GLOBAL = "000001";
var WHATSAPP_GLOBAL = "923337068868";
function simpleOrder(){
for (let i = 1; i <= 2; i++) { }
}
function Printf(){
var ITDATE = "01/01/2020";
var LSTNO = "000001";
var custname = document.getElementById("cstname").value;
var serial = 0;
OLDVARS


 var mywindow = window.open('', 'PRINT');
if(namevar1==0 ){
}
else {

var serial = (serial+1);
 mywindow.document.write('<tr class="item">OLD');
}
 mywindow.document.write('<tr class="heading2"> <td>Total</td>');
}
function mywht(){
var ITDATE = "01/01/2020";
var LSTNO = "000001";
var custname = document.getElementById("cstname").value;
var text= "";

var serial = 0;
OLDWHT
var url="https://wa.me/923337068868?text="+text;
}
function myfun(){
var ITDATE = "01/01/2020";
var LSTNO = "000001";
var custname = document.getElementById("cstname").value;
var serial = 0;
OLDVARS
myWindow=window.open('', 'PREVIEW');
if(namevar1==0 ){
}
else {

var serial = (serial+1);
 myWindow.document.write('<tr class="item">OLD');
}
 myWindow.document.write('<tr class="heading2"> <td>Total</td>');
}
function createRows(count) {
  const rows = [];

OLDPDFVARS
var serial = 0;
if(namevar1==0 ){
}
else {

var serial = (serial+1);
rows.push([ITMCODE1, ITMNAME1, namevar1, ITMDISC1]);
}
var totitem=rows.length;
}
</script>
</body></html>
"#,
    )
}
