//! 天気ウィジェット

use chrono::Local;
use leptos::*;
use web_sys::{Document, Element};

use crate::error::PageError;
use crate::render::list_items;
use crate::utils::dom::{element, replace_html, set_text};
use crate::utils::fetch::BrowserTransport;
use crate::views::Region;
use crate::weather::{load_report, WeatherReport, PLACEHOLDER};
use crate::PageContext;

pub struct WeatherWidget {
    temp: Element,
    desc: Element,
    list: Element,
}

impl Region for WeatherWidget {
    const NAME: &'static str = "weather";

    fn attach(doc: &Document) -> Result<Self, PageError> {
        Ok(Self {
            temp: element(doc, "currentTemp")?,
            desc: element(doc, "weatherDesc")?,
            list: element(doc, "forecastList")?,
        })
    }

    fn run(self, ctx: &PageContext) {
        let report = create_rw_signal(None::<WeatherReport>);

        create_effect(move |_| {
            report.with(|r| match r {
                Some(r) => {
                    set_text(&self.temp, &r.temperature);
                    set_text(&self.desc, &r.description);
                    replace_html(&self.list, &list_items(&r.forecast));
                }
                None => set_text(&self.temp, PLACEHOLDER),
            })
        });

        let config = ctx.config.weather.clone();
        spawn_local(async move {
            let today = Local::now().date_naive();
            report.set(Some(load_report(&BrowserTransport, &config, today).await));
        });
    }
}
