use serde::Deserialize;

/// Envelope of the JSON blob a Next.js page embeds in `<script type="application/json">`.
#[derive(Debug, Deserialize)]
pub struct NextData<P> {
    pub props: Props<P>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Props<P> {
    pub page_props: P,
}

impl<P> NextData<P> {
    pub fn into_page_props(self) -> P {
        self.props.page_props
    }
}
