// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::slug::slugify;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let name = m.get_one::<String>("name").unwrap();
    let slug = slugify(name);
    if slug.is_empty() {
        bail!("'{}' has no characters usable in a slug", name);
    }
    println!("{}", slug);
    Ok(())
}
