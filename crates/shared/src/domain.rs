use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// The remote API uses `""` for "not assigned yet".
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(EmpresaId);
id_newtype!(MunicipioId);
id_newtype!(RotinaId);
id_newtype!(TenantId);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Municipio {
    pub id: MunicipioId,
    pub nome: String,
}

impl Municipio {
    pub fn new(id: impl Into<String>, nome: impl Into<String>) -> Self {
        Self {
            id: MunicipioId::new(id),
            nome: nome.into(),
        }
    }

    pub fn is_selected(&self) -> bool {
        !self.id.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotina {
    pub id: RotinaId,
    pub descricao: String,
}

impl Rotina {
    pub fn new(id: impl Into<String>, descricao: impl Into<String>) -> Self {
        Self {
            id: RotinaId::new(id),
            descricao: descricao.into(),
        }
    }

    pub fn is_selected(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Company record as exchanged with the back-office API.
///
/// Absent fields deserialize to empty strings so partially populated rows from
/// the list endpoint still round-trip through the editor. Nested lookups may
/// come back as `null`; those are read as the empty lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Empresa {
    pub id: EmpresaId,
    pub nome: String,
    pub cnpj: String,
    pub ie: String,
    pub im: String,
    pub razaosocial: String,
    pub fantasia: String,
    pub endereco: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    #[serde(deserialize_with = "null_as_default")]
    pub municipio: Municipio,
    #[serde(deserialize_with = "null_as_default")]
    pub rotina: Rotina,
    pub uf: String,
    pub cep: String,
    pub tenantid: TenantId,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Free-text fields of [`Empresa`] that the editor dialog binds to inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmpresaField {
    Nome,
    Cnpj,
    Ie,
    Im,
    RazaoSocial,
    Fantasia,
    Endereco,
    Numero,
    Complemento,
    Bairro,
    Uf,
    Cep,
}

impl EmpresaField {
    pub const ALL: [EmpresaField; 12] = [
        EmpresaField::Nome,
        EmpresaField::Cnpj,
        EmpresaField::Ie,
        EmpresaField::Im,
        EmpresaField::RazaoSocial,
        EmpresaField::Fantasia,
        EmpresaField::Endereco,
        EmpresaField::Numero,
        EmpresaField::Complemento,
        EmpresaField::Bairro,
        EmpresaField::Uf,
        EmpresaField::Cep,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmpresaField::Nome => "Nome",
            EmpresaField::Cnpj => "CNPJ",
            EmpresaField::Ie => "Inscrição Estadual",
            EmpresaField::Im => "Inscrição Municipal",
            EmpresaField::RazaoSocial => "Razão Social",
            EmpresaField::Fantasia => "Nome Fantasia",
            EmpresaField::Endereco => "Endereço",
            EmpresaField::Numero => "Número",
            EmpresaField::Complemento => "Complemento",
            EmpresaField::Bairro => "Bairro",
            EmpresaField::Uf => "UF",
            EmpresaField::Cep => "CEP",
        }
    }
}

impl Empresa {
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn field(&self, field: EmpresaField) -> &str {
        match field {
            EmpresaField::Nome => &self.nome,
            EmpresaField::Cnpj => &self.cnpj,
            EmpresaField::Ie => &self.ie,
            EmpresaField::Im => &self.im,
            EmpresaField::RazaoSocial => &self.razaosocial,
            EmpresaField::Fantasia => &self.fantasia,
            EmpresaField::Endereco => &self.endereco,
            EmpresaField::Numero => &self.numero,
            EmpresaField::Complemento => &self.complemento,
            EmpresaField::Bairro => &self.bairro,
            EmpresaField::Uf => &self.uf,
            EmpresaField::Cep => &self.cep,
        }
    }

    pub fn with_field(&self, field: EmpresaField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            EmpresaField::Nome => next.nome = value,
            EmpresaField::Cnpj => next.cnpj = value,
            EmpresaField::Ie => next.ie = value,
            EmpresaField::Im => next.im = value,
            EmpresaField::RazaoSocial => next.razaosocial = value,
            EmpresaField::Fantasia => next.fantasia = value,
            EmpresaField::Endereco => next.endereco = value,
            EmpresaField::Numero => next.numero = value,
            EmpresaField::Complemento => next.complemento = value,
            EmpresaField::Bairro => next.bairro = value,
            EmpresaField::Uf => next.uf = value,
            EmpresaField::Cep => next.cep = value,
        }
        next
    }

    pub fn with_municipio(&self, municipio: Municipio) -> Self {
        Self {
            municipio,
            ..self.clone()
        }
    }

    pub fn with_rotina(&self, rotina: Rotina) -> Self {
        Self {
            rotina,
            ..self.clone()
        }
    }

    pub fn with_tenant(&self, tenantid: TenantId) -> Self {
        Self {
            tenantid,
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
