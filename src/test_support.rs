//! Fixtures shared by the unit and HTTP tests.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::TestRequest;
use actix_web::{App, web};
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use uuid::Uuid;

use crate::config::Config;
use crate::relay::whatsapp::WhatsAppRelay;
use crate::routes::{self, RateLimits};
use crate::sheet::Sheet;
use crate::sheet::workbook::CellValue;
use crate::utils::file_store::Storage;

/// Builds a sheet from string rows; row and column indices are positions,
/// empty strings leave the cell empty.
pub fn sheet_from_rows(name: &str, rows: &[&[&str]]) -> Sheet {
    let mut sheet = Sheet::new(name);
    for (row, cells) in rows.iter().enumerate() {
        for (col, value) in cells.iter().enumerate() {
            sheet.insert(row as u32, col as u32, CellValue::Text((*value).to_string()));
        }
    }
    sheet
}

/// In-memory xlsx file written with rust_xlsxwriter.
pub struct XlsxFixture {
    workbook: XlsxWorkbook,
}

impl XlsxFixture {
    pub fn new() -> Self {
        Self {
            workbook: XlsxWorkbook::new(),
        }
    }

    pub fn sheet(mut self, name: &str, rows: &[&[&str]]) -> Self {
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(name).unwrap();
        for (row, cells) in rows.iter().enumerate() {
            for (col, value) in cells.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(row as u32, col as u16, *value).unwrap();
                }
            }
        }
        self
    }

    /// Writes a numeric cell into an already added sheet.
    pub fn number(mut self, sheet: &str, row: u32, col: u16, value: f64) -> Self {
        self.workbook
            .worksheet_from_name(sheet)
            .unwrap()
            .write_number(row, col, value)
            .unwrap();
        self
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.workbook.save_to_buffer().unwrap()
    }
}

/// Fresh directory under the system temp dir.
pub fn temp_root(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{prefix}-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Request with a peer address, which the per-IP rate limiter requires.
pub fn request() -> TestRequest {
    TestRequest::default().peer_addr(SocketAddr::from(([127, 0, 0, 1], 40000)))
}

/// Config, storage and relay rooted in a fresh temp directory.
pub struct TestContext {
    pub config: Config,
    pub storage: Storage,
    relay: WhatsAppRelay,
}

impl TestContext {
    pub fn new() -> Self {
        let root = temp_root("attendance-viewer");
        let config = Config::for_tests(&root);
        let storage = Storage::new(&config.upload_dir, &config.media_dir).unwrap();
        let relay = WhatsAppRelay::from_config(&config);
        Self {
            config,
            storage,
            relay,
        }
    }

    /// Points the relay at a provider URL with a dummy token.
    pub fn with_relay(mut self, url: &str) -> Self {
        self.config.whatsapp_api_url = url.to_string();
        self.config.whatsapp_token = "token".into();
        self.relay = WhatsAppRelay::from_config(&self.config);
        self
    }

    /// Stores raw workbook bytes as an uploaded spreadsheet and returns its id.
    pub fn store_workbook(&self, bytes: Vec<u8>) -> String {
        self.storage.spreadsheets.save("fixture.xlsx", &bytes).unwrap().id
    }

    /// The production route table over this context's state.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let config = self.config.clone();
        let limits = RateLimits::from_config(&config);
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.relay.clone()))
            .configure(move |cfg| routes::configure(cfg, &config, limits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn app_does_not_borrow_the_context() {
        let app = {
            let ctx = TestContext::new();
            ctx.app()
        };
        let app = actix_web::test::init_service(app).await;

        let resp = actix_web::test::call_service(&app, request().uri("/files").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
