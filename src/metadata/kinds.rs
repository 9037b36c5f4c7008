use regex::Regex;

/// Well-known zone metadata kinds.
///
/// The endpoint accepts any kind string; this enum only names the ones the
/// client knows how to classify. Custom kinds follow the `X-` prefix rule
/// checked by [`is_custom_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    AllowAxfrFrom,
    AllowDnsUpdateFrom,
    AlsoNotify,
    ForwardDnsUpdate,
    NotifyDnsUpdate,
    Ixfr,
    PublishCdnskey,
    PublishCds,
    SlaveRenotify,
    TsigAllowAxfr,
    TsigAllowDnsUpdate,
    GssAcceptorPrincipal,
    GssAllowAxfrPrincipal,
    AxfrMasterTsig,
    LuaAxfrScript,
    Nsec3Narrow,
    Nsec3Param,
    Presigned,
    SoaEdit,
    ApiRectify,
    EnableLuaRecords,
    SoaEditApi,
}

/// What the metadata endpoint allows for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindAccess {
    Writable,
    /// GET works, writes are refused.
    ReadOnly,
    /// Managed through the zones API or server settings instead.
    NotViaHttp,
}

const ALL_KINDS: [MetadataKind; 22] = [
    MetadataKind::AllowAxfrFrom,
    MetadataKind::AllowDnsUpdateFrom,
    MetadataKind::AlsoNotify,
    MetadataKind::ForwardDnsUpdate,
    MetadataKind::NotifyDnsUpdate,
    MetadataKind::Ixfr,
    MetadataKind::PublishCdnskey,
    MetadataKind::PublishCds,
    MetadataKind::SlaveRenotify,
    MetadataKind::TsigAllowAxfr,
    MetadataKind::TsigAllowDnsUpdate,
    MetadataKind::GssAcceptorPrincipal,
    MetadataKind::GssAllowAxfrPrincipal,
    MetadataKind::AxfrMasterTsig,
    MetadataKind::LuaAxfrScript,
    MetadataKind::Nsec3Narrow,
    MetadataKind::Nsec3Param,
    MetadataKind::Presigned,
    MetadataKind::SoaEdit,
    MetadataKind::ApiRectify,
    MetadataKind::EnableLuaRecords,
    MetadataKind::SoaEditApi,
];

impl MetadataKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetadataKind::AllowAxfrFrom => "ALLOW-AXFR-FROM",
            MetadataKind::AllowDnsUpdateFrom => "ALLOW-DNSUPDATE-FROM",
            MetadataKind::AlsoNotify => "ALSO-NOTIFY",
            MetadataKind::ForwardDnsUpdate => "FORWARD-DNSUPDATE",
            MetadataKind::NotifyDnsUpdate => "NOTIFY-DNSUPDATE",
            MetadataKind::Ixfr => "IXFR",
            MetadataKind::PublishCdnskey => "PUBLISH-CDNSKEY",
            MetadataKind::PublishCds => "PUBLISH-CDS",
            MetadataKind::SlaveRenotify => "SLAVE-RENOTIFY",
            MetadataKind::TsigAllowAxfr => "TSIG-ALLOW-AXFR",
            MetadataKind::TsigAllowDnsUpdate => "TSIG-ALLOW-DNSUPDATE",
            MetadataKind::GssAcceptorPrincipal => "GSS-ACCEPTOR-PRINCIPAL",
            MetadataKind::GssAllowAxfrPrincipal => "GSS-ALLOW-AXFR-PRINCIPAL",
            MetadataKind::AxfrMasterTsig => "AXFR-MASTER-TSIG",
            MetadataKind::LuaAxfrScript => "LUA-AXFR-SCRIPT",
            MetadataKind::Nsec3Narrow => "NSEC3NARROW",
            MetadataKind::Nsec3Param => "NSEC3PARAM",
            MetadataKind::Presigned => "PRESIGNED",
            MetadataKind::SoaEdit => "SOA-EDIT",
            MetadataKind::ApiRectify => "API-RECTIFY",
            MetadataKind::EnableLuaRecords => "ENABLE-LUA-RECORDS",
            MetadataKind::SoaEditApi => "SOA-EDIT-API",
        }
    }

    /// Exact, case-sensitive lookup of a wire name.
    pub fn parse(kind: &str) -> Option<Self> {
        ALL_KINDS.into_iter().find(|k| k.as_str() == kind)
    }

    pub fn access(self) -> KindAccess {
        match self {
            MetadataKind::AxfrMasterTsig
            | MetadataKind::LuaAxfrScript
            | MetadataKind::Nsec3Narrow
            | MetadataKind::Nsec3Param
            | MetadataKind::Presigned
            | MetadataKind::SoaEdit => KindAccess::ReadOnly,
            MetadataKind::ApiRectify
            | MetadataKind::EnableLuaRecords
            | MetadataKind::SoaEditApi => KindAccess::NotViaHttp,
            _ => KindAccess::Writable,
        }
    }
}

impl std::fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify any kind string. Unknown and custom kinds are writable; the
/// server has the final say.
pub fn classify(kind: &str) -> KindAccess {
    MetadataKind::parse(kind)
        .map_or(KindAccess::Writable, MetadataKind::access)
}

lazy_static::lazy_static! {
    /// "X-" or "x-" followed by at least one character
    static ref CUSTOM_KIND_RE: Regex = Regex::new(r"^[Xx]-.+").unwrap();
}

/// Custom metadata kinds carry the `X-` prefix, e.g. `X-MyApp-Owner`.
pub fn is_custom_kind(kind: &str) -> bool {
    CUSTOM_KIND_RE.is_match(kind)
}
