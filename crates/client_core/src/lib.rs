use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Empresa, Municipio, Rotina, TenantId},
    error::ApiError,
    protocol::{
        EmpresaPage, LazyTableState, MunicipiosResponse, RotinasResponse, UsuarioTenantResponse,
    },
};
use tracing::{debug, warn};
use url::Url;

pub mod error;
pub mod settings;

pub use error::{GatewayError, TenantError};
pub use settings::{load_settings, ClientSettings};

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

const EMPRESAS_PATH: &str = "api/empresas";
const EMPRESA_PATH: &str = "api/empresa";
const MUNICIPIOS_LITE_PATH: &str = "api/municipios/lite";
const ROTINAS_LITE_PATH: &str = "api/rotinas/lite";
const USUARIO_TENANT_PATH: &str = "api/usuariotenant";

#[async_trait]
pub trait EmpresaGateway: Send + Sync {
    async fn list(&self, query: &LazyTableState) -> GatewayResult<EmpresaPage>;
    /// The server answers a create with the refreshed first page.
    async fn create(&self, empresa: &Empresa) -> GatewayResult<EmpresaPage>;
    async fn update(&self, empresa: &Empresa) -> GatewayResult<()>;
    async fn delete(&self, empresa: &Empresa) -> GatewayResult<()>;
}

#[async_trait]
pub trait MunicipioGateway: Send + Sync {
    async fn list_municipios(&self) -> GatewayResult<Vec<Municipio>>;
}

#[async_trait]
pub trait RotinaGateway: Send + Sync {
    /// An unselected municipality leaves the scope to the server.
    async fn list_rotinas(&self, municipio: &Municipio) -> GatewayResult<Vec<Rotina>>;
}

#[async_trait]
pub trait TenantResolver: Send + Sync {
    async fn resolve_tenant(&self) -> std::result::Result<TenantId, TenantError>;
}

/// HTTP implementation of every gateway the Empresas screen talks to.
#[derive(Clone)]
pub struct BackofficeClient {
    http: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl BackofficeClient {
    pub fn new(settings: &ClientSettings) -> anyhow::Result<Self> {
        Ok(Self::with_base_url(
            settings.base_url()?,
            settings.auth_token.clone(),
        ))
    }

    pub fn with_base_url(base_url: Url, auth_token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            auth_token,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_checked(&self, request: RequestBuilder) -> GatewayResult<(String, String)> {
        let response = self.authorized(request).send().await?;
        let endpoint = response.url().path().to_string();
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let error = ApiError::from_response(status.as_u16(), &body);
            warn!(
                endpoint = %endpoint,
                status = status.as_u16(),
                "backoffice: request rejected: {}",
                error.message
            );
            return Err(GatewayError::Status {
                status: status.as_u16(),
                error,
            });
        }
        Ok((endpoint, body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<T> {
        let (endpoint, body) = self.send_checked(request).await?;
        serde_json::from_str(&body).map_err(|source| GatewayError::Decode { endpoint, source })
    }

    async fn send_empty(&self, request: RequestBuilder) -> GatewayResult<()> {
        self.send_checked(request).await.map(|_| ())
    }
}

#[async_trait]
impl EmpresaGateway for BackofficeClient {
    async fn list(&self, query: &LazyTableState) -> GatewayResult<EmpresaPage> {
        let lazy_event = query.to_lazy_event().map_err(GatewayError::Encode)?;
        debug!(
            first = query.first,
            rows = query.rows,
            filter = query.name_filter(),
            "backoffice: list empresas"
        );
        let request = self
            .http
            .get(self.endpoint(EMPRESAS_PATH)?)
            .query(&[("lazyEvent", lazy_event)]);
        self.send_json(request).await
    }

    async fn create(&self, empresa: &Empresa) -> GatewayResult<EmpresaPage> {
        let request = self.http.post(self.endpoint(EMPRESA_PATH)?).json(empresa);
        self.send_json(request).await
    }

    async fn update(&self, empresa: &Empresa) -> GatewayResult<()> {
        let request = self.http.put(self.endpoint(EMPRESA_PATH)?).json(empresa);
        self.send_empty(request).await
    }

    async fn delete(&self, empresa: &Empresa) -> GatewayResult<()> {
        let request = self
            .http
            .delete(self.endpoint(EMPRESA_PATH)?)
            .json(empresa);
        self.send_empty(request).await
    }
}

#[async_trait]
impl MunicipioGateway for BackofficeClient {
    async fn list_municipios(&self) -> GatewayResult<Vec<Municipio>> {
        let request = self.http.get(self.endpoint(MUNICIPIOS_LITE_PATH)?);
        let response: MunicipiosResponse = self.send_json(request).await?;
        Ok(response.municipios)
    }
}

#[async_trait]
impl RotinaGateway for BackofficeClient {
    async fn list_rotinas(&self, municipio: &Municipio) -> GatewayResult<Vec<Rotina>> {
        let request = self
            .http
            .get(self.endpoint(ROTINAS_LITE_PATH)?)
            .query(&[("municipio", municipio.id.as_str())]);
        let response: RotinasResponse = self.send_json(request).await?;
        Ok(response.rotinas)
    }
}

#[async_trait]
impl TenantResolver for BackofficeClient {
    async fn resolve_tenant(&self) -> std::result::Result<TenantId, TenantError> {
        let request = self.http.get(self.endpoint(USUARIO_TENANT_PATH)?);
        let response: UsuarioTenantResponse = self.send_json(request).await?;
        if response.tenantid.is_empty() {
            return Err(TenantError::MissingTenant);
        }
        Ok(response.tenantid)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
